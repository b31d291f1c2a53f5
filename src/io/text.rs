//! Plain-text rendering of square-lattice covers
//!
//! One character per cell, highest row first. Pieces are shown by the first
//! character of their names when those are all different, otherwise by
//! letters in name order.

use crate::algorithm::translation::Cover;
use crate::io::configuration::EMPTY_CELL_CHAR;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::cells::Cell;
use crate::spatial::lattice::{Lattice, bounds};
use crate::spatial::region::Region;
use std::collections::HashSet;

/// Characters standing for each piece, in the cover's name order
pub fn piece_symbols(cover: &Cover) -> Vec<char> {
    let initials: Vec<char> = cover
        .pieces()
        .keys()
        .map(|name| name.chars().next().unwrap_or('?'))
        .collect();

    let distinct: HashSet<char> = initials.iter().copied().collect();
    if distinct.len() == initials.len() {
        return initials;
    }

    ('A'..='Z')
        .chain('a'..='z')
        .chain('0'..='9')
        .cycle()
        .take(initials.len())
        .collect()
}

/// Draw a cover of a square-lattice region as text
///
/// Cells outside the region are blank; region cells no piece covers use
/// `EMPTY_CELL_CHAR`.
///
/// # Errors
///
/// Returns an error if the region is not on the square lattice
pub fn render_text(cover: &Cover, region: &Region) -> Result<String> {
    if region.lattice() != Lattice::Square {
        return Err(invalid_parameter(
            "region",
            &region.lattice(),
            &"text rendering needs a square lattice",
        ));
    }

    let anchors: Vec<_> = region.cells().iter().map(Cell::anchor).collect();
    let Some((min, max)) = bounds(&anchors) else {
        return Ok(String::new());
    };

    let symbols = piece_symbols(cover);
    let mut text = String::new();

    for y in (min[1]..=max[1]).rev() {
        let mut line = String::new();
        for x in min[0]..=max[0] {
            let cell = Cell::square([x, y]);
            let symbol = if region.contains_cell(&cell) {
                cover
                    .pieces()
                    .values()
                    .position(|piece| piece.cells.contains(&cell))
                    .and_then(|index| symbols.get(index).copied())
                    .unwrap_or(EMPTY_CELL_CHAR)
            } else {
                ' '
            };
            line.push(symbol);
        }
        text.push_str(line.trim_end());
        text.push('\n');
    }

    Ok(text)
}
