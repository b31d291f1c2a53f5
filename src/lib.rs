//! Exact covers of lattice regions by polyomino and polyiamond pieces
//!
//! Pieces are turned into every symmetry-distinct orientation, every
//! orientation is placed at every position inside the region, and the
//! placements become the rows of an exact-cover matrix. A depth-first
//! Algorithm X search enumerates covers, optionally pruned by a 2x2 block
//! rule and by ray clues.

#![forbid(unsafe_code)]

/// Orientation, placement, matrix construction, search and translation
pub mod algorithm;
/// Diagnostics and after-the-fact cover checks
pub mod analysis;
/// Command line driver, rendering, progress reporting and error handling
pub mod io;
/// Lattice geometry, cells, regions and piece shapes
pub mod spatial;

pub use io::error::{CoverError, Result};
