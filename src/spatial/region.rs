//! Target regions: finite, immutable sets of lattice cells
//!
//! A region keeps the lattice points touched by its cells so that placement
//! enumeration can anchor candidate translations and reject them cheaply.

use crate::io::error::{CoverError, Result};
use crate::spatial::cells::{Cell, corner_points, derive_cells};
use crate::spatial::lattice::{Lattice, Point, check_closed_path, translate};
use std::collections::BTreeSet;

// Steps tracing the hexagon-like board counter-clockwise from (-3, -5)
const HEXAGONISH_START: Point = [-3, -5];
const HEXAGONISH_STEPS: [Point; 30] = [
    [1, 0],
    [1, 1],
    [1, 0],
    [1, 1],
    [1, 0],
    [1, 1],
    [0, 1],
    [1, 1],
    [0, 1],
    [1, 1],
    [0, 1],
    [-1, 0],
    [0, 1],
    [-1, 0],
    [0, 1],
    [-1, 0],
    [-1, -1],
    [-1, 0],
    [-1, -1],
    [-1, 0],
    [-1, -1],
    [0, -1],
    [-1, -1],
    [0, -1],
    [-1, -1],
    [0, -1],
    [1, 0],
    [0, -1],
    [1, 0],
    [0, -1],
];

/// A finite set of cells to be covered, plus its outline for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    lattice: Lattice,
    cells: BTreeSet<Cell>,
    points: BTreeSet<Point>,
    perimeter: Vec<Point>,
}

impl Region {
    /// Build a region from the closed perimeter path enclosing it
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a closed simple lattice walk or
    /// encloses no cells.
    pub fn from_perimeter(lattice: Lattice, perimeter: Vec<Point>) -> Result<Self> {
        check_closed_path(lattice, &perimeter)
            .map_err(|reason| CoverError::InvalidRegion { reason })?;

        let cells = derive_cells(lattice, &perimeter);
        let mut region = Self::from_cells(lattice, cells)?;
        region.perimeter = perimeter;
        Ok(region)
    }

    /// Build a region from an explicit cell set
    ///
    /// The region has no outline; renderers fall back to drawing its cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty or holds cells of another lattice.
    pub fn from_cells(lattice: Lattice, cells: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();

        if cells.is_empty() {
            return Err(CoverError::InvalidRegion {
                reason: "region contains no cells".to_string(),
            });
        }

        if let Some(stray) = cells.iter().find(|cell| cell.lattice() != lattice) {
            return Err(CoverError::InvalidRegion {
                reason: format!("{stray} does not belong to the {lattice} lattice"),
            });
        }

        let points = corner_points(&cells).into_iter().collect();

        Ok(Self {
            lattice,
            cells,
            points,
            perimeter: Vec::new(),
        })
    }

    /// Axis-aligned `width` by `height` rectangle of unit squares
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds the lattice
    /// coordinate range.
    pub fn rectangle(width: usize, height: usize) -> Result<Self> {
        let (Ok(width_i32), Ok(height_i32)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(CoverError::InvalidRegion {
                reason: format!(
                    "rectangle dimensions {width}x{height} exceed the lattice coordinate range"
                ),
            });
        };
        if width_i32 == 0 || height_i32 == 0 {
            return Err(CoverError::InvalidRegion {
                reason: format!("rectangle dimensions must be positive, got {width}x{height}"),
            });
        }

        let mut perimeter = Vec::new();
        perimeter.extend((0..width_i32).map(|x| [x, 0]));
        perimeter.extend((0..height_i32).map(|y| [width_i32, y]));
        perimeter.extend((1..=width_i32).rev().map(|x| [x, height_i32]));
        perimeter.extend((1..=height_i32).rev().map(|y| [0, y]));

        Self::from_perimeter(Lattice::Square, perimeter)
    }

    /// The hexagon-like triangular board of 114 unit triangles
    ///
    /// # Errors
    ///
    /// Never fails in practice; the outline is checked like any other.
    pub fn hexagonish() -> Result<Self> {
        let mut perimeter = vec![HEXAGONISH_START];
        let mut current = HEXAGONISH_START;
        // The last step returns to the start, which the path leaves implicit
        for &step in HEXAGONISH_STEPS.iter().take(HEXAGONISH_STEPS.len() - 1) {
            current = translate(current, step);
            perimeter.push(current);
        }

        Self::from_perimeter(Lattice::Triangular, perimeter)
    }

    /// Lattice of the region
    pub const fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// Cells of the region in sorted order
    pub const fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// Lattice points touched by the region's cells, in sorted order
    pub const fn points(&self) -> &BTreeSet<Point> {
        &self.points
    }

    /// Outline of the region, empty when built from cells
    pub fn perimeter(&self) -> &[Point] {
        &self.perimeter
    }

    /// Number of cells to cover
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Test cell membership
    pub fn contains_cell(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Test lattice point membership
    pub fn contains_point(&self, point: &Point) -> bool {
        self.points.contains(point)
    }
}
