//! Lattice geometry, cells, regions and piece shapes
//!
//! This module contains spatial-related functionality including:
//! - Square and triangular lattice symmetry operations
//! - Cell identity and derivation of enclosed cells
//! - Target regions and the built-in piece catalogues

/// Unit cells and enclosed-cell derivation
pub mod cells;
/// Lattice points and symmetry operations
pub mod lattice;
/// Target regions and region builders
pub mod region;
/// Piece shapes and catalogues
pub mod shapes;

pub use cells::Cell;
pub use lattice::{Lattice, Point};
pub use region::Region;
