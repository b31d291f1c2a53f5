//! Diagnostic counts for catalogues and exact-cover matrices
//!
//! Nothing here affects the search; the numbers are for reports and for
//! checking that a problem has the expected size.

use crate::algorithm::matrix::{ConstraintKey, ProblemMatrix};
use crate::algorithm::orientation::orientations;
use crate::spatial::shapes::Catalogue;
use std::fmt;

/// Orientation counts of one catalogue shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationSummary {
    /// Shape name
    pub name: String,
    /// Cells in the shape
    pub cells: usize,
    /// Orientations reachable by rotation
    pub proper: usize,
    /// Orientations needing a reflection
    pub mirrored: usize,
}

/// Orientation counts for every shape, in catalogue order
pub fn orientation_summary(catalogue: &Catalogue) -> Vec<OrientationSummary> {
    catalogue
        .shapes()
        .iter()
        .map(|shape| {
            let set = orientations(catalogue.lattice(), shape);
            OrientationSummary {
                name: shape.name().to_string(),
                cells: shape.cells().len(),
                proper: set.proper.len(),
                mirrored: set.mirrored.len(),
            }
        })
        .collect()
}

/// Size of a built matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixStatistics {
    /// Placements per piece key, in key order
    pub placements: Vec<(String, usize)>,
    /// Total rows
    pub rows: usize,
    /// Total keys
    pub keys: usize,
    /// Keys that must be satisfied exactly once
    pub primary_keys: usize,
    /// Cell keys
    pub cell_keys: usize,
}

impl MatrixStatistics {
    /// Collect counts from a matrix
    pub fn from_matrix(matrix: &ProblemMatrix) -> Self {
        let placements = matrix
            .keys()
            .iter()
            .enumerate()
            .filter_map(|(id, key)| match key {
                ConstraintKey::Piece(name) => Some((name.clone(), matrix.column(id).len())),
                ConstraintKey::Cell(_) => None,
            })
            .collect();

        Self {
            placements,
            rows: matrix.row_count(),
            keys: matrix.key_count(),
            primary_keys: matrix.primary_keys().count(),
            cell_keys: matrix.cell_key_count(),
        }
    }

    /// Placement count of a piece key
    pub fn placements_of(&self, piece: &str) -> Option<usize> {
        self.placements
            .iter()
            .find(|(name, _)| name == piece)
            .map(|&(_, count)| count)
    }
}

impl fmt::Display for MatrixStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .placements
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("piece".len());

        writeln!(f, "{:<width$}  placements", "piece")?;
        for (name, count) in &self.placements {
            writeln!(f, "{name:<width$}  {count:>10}")?;
        }
        writeln!(
            f,
            "{} rows, {} keys ({} primary, {} cells)",
            self.rows, self.keys, self.primary_keys, self.cell_keys
        )
    }
}
