//! After-the-fact checks of emitted covers

use crate::algorithm::matrix::CoverMode;
use crate::algorithm::translation::Cover;
use crate::io::error::{Result, invariant_violation};
use crate::spatial::cells::Cell;
use crate::spatial::lattice::Point;
use crate::spatial::region::Region;
use std::collections::BTreeSet;

/// Check that a cover's pieces are disjoint and inside the region
///
/// In exact mode the pieces must also cover every region cell.
///
/// # Errors
///
/// Returns an invariant violation describing the first defect found
pub fn verify_cover(cover: &Cover, region: &Region, mode: CoverMode) -> Result<()> {
    let mut covered = BTreeSet::new();

    for (name, piece) in cover.pieces() {
        if piece.cells.is_empty() {
            return Err(invariant_violation(
                "cover verification",
                &format!("piece '{name}' covers no cells"),
            ));
        }
        for cell in &piece.cells {
            if !region.contains_cell(cell) {
                return Err(invariant_violation(
                    "cover verification",
                    &format!("piece '{name}' covers {cell} outside the region"),
                ));
            }
            if !covered.insert(*cell) {
                return Err(invariant_violation(
                    "cover verification",
                    &format!("{cell} is covered twice"),
                ));
            }
        }
    }

    if mode == CoverMode::Exact
        && let Some(gap) = region.cells().iter().find(|cell| !covered.contains(*cell))
    {
        return Err(invariant_violation(
            "cover verification",
            &format!("{gap} is not covered"),
        ));
    }

    Ok(())
}

/// Minimum corners of the 2x2 blocks a cover fills completely
///
/// Always empty for triangular regions.
pub fn filled_blocks(cover: &Cover, region: &Region) -> Vec<Point> {
    let covered = cover.cells();

    region
        .cells()
        .iter()
        .filter_map(|cell| match *cell {
            Cell::Square([x, y]) => Some([x, y]),
            Cell::Triangle(_) => None,
        })
        .filter(|&[x, y]| {
            [[x, y], [x + 1, y], [x, y + 1], [x + 1, y + 1]]
                .iter()
                .all(|&corner| covered.contains(&Cell::square(corner)))
        })
        .collect()
}
