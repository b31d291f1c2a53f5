//! Command line driver, rendering, progress reporting and error handling

/// Command line interface and run orchestration
pub mod cli;
/// Named constants and defaults
pub mod configuration;
/// Error types for all cover operations
pub mod error;
/// PNG rendering of covers
pub mod image;
/// Progress display for the search
pub mod progress;
/// Plain-text rendering of square-lattice covers
pub mod text;
