//! Diagnostics and after-the-fact checks of matrices and covers

/// Placement, row and key counts and orientation summaries
pub mod statistics;
/// Cover validity and 2x2 block checks
pub mod verification;
