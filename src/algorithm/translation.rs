//! Re-keying raw row-index solutions into piece-to-cells covers

use crate::algorithm::matrix::{ConstraintKey, ProblemMatrix};
use crate::io::error::{Result, invariant_violation};
use crate::spatial::cells::Cell;
use crate::spatial::lattice::Point;
use std::collections::{BTreeMap, BTreeSet};

/// Where one piece sits in a cover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoveredPiece {
    /// Cells occupied by the piece
    pub cells: BTreeSet<Cell>,
    /// Perimeter of the placement, for drawing
    pub perimeter: Vec<Point>,
    /// Whether the placed orientation is a reflection
    pub mirrored: bool,
}

/// One complete assignment of pieces to region cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    pieces: BTreeMap<String, CoveredPiece>,
}

impl Cover {
    /// Pieces keyed by piece name
    pub const fn pieces(&self) -> &BTreeMap<String, CoveredPiece> {
        &self.pieces
    }

    /// Placement of a named piece
    pub fn get(&self, piece: &str) -> Option<&CoveredPiece> {
        self.pieces.get(piece)
    }

    /// Number of pieces placed
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Test whether no piece is placed
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Place a piece, returning the placement it replaces
    pub fn insert(&mut self, name: impl Into<String>, piece: CoveredPiece) -> Option<CoveredPiece> {
        self.pieces.insert(name.into(), piece)
    }

    /// Union of every piece's cells
    pub fn cells(&self) -> BTreeSet<Cell> {
        self.pieces
            .values()
            .flat_map(|piece| piece.cells.iter().copied())
            .collect()
    }

    /// Name of the piece covering a cell
    pub fn owner(&self, cell: &Cell) -> Option<&str> {
        self.pieces
            .iter()
            .find(|(_, piece)| piece.cells.contains(cell))
            .map(|(name, _)| name.as_str())
    }
}

/// Convert row-index solutions into covers
///
/// Each row contributes its single piece-identity key as the cover entry and
/// its cell keys as that entry's cells.
///
/// # Errors
///
/// Returns an invariant violation if a row does not exist, a row carries
/// zero or several piece keys, or one piece appears twice in a solution.
pub fn translate_covers(raw: &[Vec<usize>], matrix: &ProblemMatrix) -> Result<Vec<Cover>> {
    raw.iter()
        .map(|solution| translate_cover(solution, matrix))
        .collect()
}

fn translate_cover(solution: &[usize], matrix: &ProblemMatrix) -> Result<Cover> {
    let mut cover = Cover::default();

    for &row_id in solution {
        let row = matrix.row(row_id).ok_or_else(|| {
            invariant_violation("cover translation", &format!("row {row_id} does not exist"))
        })?;

        let mut piece = None;
        let mut cells = BTreeSet::new();
        for &key in &row.keys {
            match matrix.key(key) {
                Some(ConstraintKey::Piece(name)) => {
                    if piece.replace(name).is_some() {
                        return Err(invariant_violation(
                            "cover translation",
                            &format!("row {row_id} has more than one piece key"),
                        ));
                    }
                }
                Some(ConstraintKey::Cell(cell)) => {
                    cells.insert(*cell);
                }
                None => {
                    return Err(invariant_violation(
                        "cover translation",
                        &format!("row {row_id} refers to missing key {key}"),
                    ));
                }
            }
        }

        let name = piece.ok_or_else(|| {
            invariant_violation("cover translation", &format!("row {row_id} has no piece key"))
        })?;

        let covered = CoveredPiece {
            cells,
            perimeter: row.placement.perimeter.clone(),
            mirrored: row.placement.mirrored,
        };
        if cover.insert(name.clone(), covered).is_some() {
            return Err(invariant_violation(
                "cover translation",
                &format!("piece '{name}' is placed twice"),
            ));
        }
    }

    Ok(cover)
}
