//! Named piece shapes and the catalogues that group them
//!
//! A shape is defined by its closed perimeter; its cells are derived from the
//! perimeter once at construction. Catalogues are immutable values handed to
//! every pipeline entry point.

use crate::io::error::{CoverError, Result};
use crate::spatial::cells::{Cell, derive_cells};
use crate::spatial::lattice::{Lattice, Point, check_closed_path};
use std::collections::BTreeSet;

/// Smallest number of cells a piece may enclose
pub const MIN_SHAPE_CELLS: usize = 3;

// Hexiamond outlines; names follow MathWorld's hexiamond page
const HEXIAMONDS: [(&str, &[Point]); 12] = [
    (
        "bar",
        &[[0, 0], [1, 0], [2, 0], [3, 0], [4, 1], [3, 1], [2, 1], [1, 1]],
    ),
    (
        "crook",
        &[[0, 0], [1, 0], [2, 0], [3, 1], [2, 1], [1, 1], [1, 2], [0, 1]],
    ),
    (
        "crown",
        &[[0, 0], [1, 0], [2, 0], [3, 1], [2, 1], [2, 2], [1, 1], [0, 1]],
    ),
    (
        "sphinx",
        &[[0, 0], [1, 0], [2, 0], [3, 0], [3, 1], [2, 1], [2, 2], [1, 1]],
    ),
    (
        "snake",
        &[[0, 0], [0, -1], [1, 0], [2, 0], [3, 1], [3, 2], [2, 1], [1, 1]],
    ),
    (
        "yacht",
        &[[0, 0], [1, 0], [2, 0], [3, 1], [3, 2], [2, 1], [2, 2], [1, 1]],
    ),
    (
        "chevron",
        &[[0, 0], [1, 0], [2, 0], [3, 1], [4, 2], [3, 2], [2, 1], [1, 1]],
    ),
    (
        "signpost",
        &[[0, 0], [0, -1], [1, 0], [2, 0], [3, 1], [2, 1], [2, 2], [1, 1]],
    ),
    (
        "lobster",
        &[[0, 0], [0, -1], [1, 0], [1, -1], [2, 0], [2, 1], [2, 2], [1, 1]],
    ),
    (
        "hook",
        &[[0, 0], [1, 0], [2, 1], [2, 0], [3, 1], [3, 2], [2, 2], [1, 1]],
    ),
    ("hexagon", &[[0, 0], [1, 0], [2, 1], [2, 2], [1, 2], [0, 1]]),
    (
        "butterfly",
        &[[0, 0], [1, 0], [2, 0], [2, 1], [3, 2], [2, 2], [1, 2], [1, 1]],
    ),
];

const PENTOMINOES: [(&str, &[Point]); 12] = [
    (
        "F",
        &[
            [1, 0], [2, 0], [2, 1], [2, 2], [3, 2], [3, 3],
            [2, 3], [1, 3], [1, 2], [0, 2], [0, 1], [1, 1],
        ],
    ),
    (
        "I",
        &[
            [0, 0], [1, 0], [2, 0], [3, 0], [4, 0], [5, 0],
            [5, 1], [4, 1], [3, 1], [2, 1], [1, 1], [0, 1],
        ],
    ),
    (
        "L",
        &[
            [0, 0], [1, 0], [2, 0], [2, 1], [1, 1], [1, 2],
            [1, 3], [1, 4], [0, 4], [0, 3], [0, 2], [0, 1],
        ],
    ),
    (
        "N",
        &[
            [0, 0], [1, 0], [2, 0], [3, 0], [3, 1], [4, 1],
            [4, 2], [3, 2], [2, 2], [2, 1], [1, 1], [0, 1],
        ],
    ),
    (
        "P",
        &[
            [0, 0], [1, 0], [2, 0], [2, 1], [2, 2],
            [1, 2], [1, 3], [0, 3], [0, 2], [0, 1],
        ],
    ),
    (
        "T",
        &[
            [1, 0], [2, 0], [2, 1], [2, 2], [3, 2], [3, 3],
            [2, 3], [1, 3], [0, 3], [0, 2], [1, 2], [1, 1],
        ],
    ),
    (
        "U",
        &[
            [0, 0], [1, 0], [2, 0], [3, 0], [3, 1], [3, 2],
            [2, 2], [2, 1], [1, 1], [1, 2], [0, 2], [0, 1],
        ],
    ),
    (
        "V",
        &[
            [0, 0], [1, 0], [2, 0], [3, 0], [3, 1], [2, 1],
            [1, 1], [1, 2], [1, 3], [0, 3], [0, 2], [0, 1],
        ],
    ),
    (
        "W",
        &[
            [0, 0], [1, 0], [2, 0], [2, 1], [3, 1], [3, 2],
            [3, 3], [2, 3], [2, 2], [1, 2], [1, 1], [0, 1],
        ],
    ),
    (
        "X",
        &[
            [1, 0], [2, 0], [2, 1], [3, 1], [3, 2], [2, 2],
            [2, 3], [1, 3], [1, 2], [0, 2], [0, 1], [1, 1],
        ],
    ),
    (
        "Y",
        &[
            [0, 0], [1, 0], [2, 0], [3, 0], [4, 0], [4, 1],
            [3, 1], [2, 1], [2, 2], [1, 2], [1, 1], [0, 1],
        ],
    ),
    (
        "Z",
        &[
            [1, 0], [2, 0], [3, 0], [3, 1], [2, 1], [2, 2],
            [2, 3], [1, 3], [0, 3], [0, 2], [1, 2], [1, 1],
        ],
    ),
];

/// A named piece: its base perimeter and the cells that perimeter encloses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    name: String,
    perimeter: Vec<Point>,
    cells: BTreeSet<Cell>,
}

impl Shape {
    /// Create a shape from its closed perimeter
    ///
    /// # Errors
    ///
    /// Returns an error if the perimeter is not a closed simple lattice walk
    /// or encloses fewer than [`MIN_SHAPE_CELLS`] cells.
    pub fn new(lattice: Lattice, name: impl Into<String>, perimeter: Vec<Point>) -> Result<Self> {
        let name = name.into();

        check_closed_path(lattice, &perimeter).map_err(|reason| CoverError::InvalidShape {
            name: name.clone(),
            reason,
        })?;

        let cells = derive_cells(lattice, &perimeter);
        if cells.len() < MIN_SHAPE_CELLS {
            return Err(CoverError::InvalidShape {
                name,
                reason: format!(
                    "encloses {} cells, at least {MIN_SHAPE_CELLS} are required",
                    cells.len()
                ),
            });
        }

        Ok(Self {
            name,
            perimeter,
            cells,
        })
    }

    /// Piece name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base perimeter path
    pub fn perimeter(&self) -> &[Point] {
        &self.perimeter
    }

    /// Cells enclosed by the base perimeter
    pub const fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }
}

/// An ordered set of uniquely named shapes on one lattice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    lattice: Lattice,
    shapes: Vec<Shape>,
}

impl Catalogue {
    /// Create an empty catalogue
    pub const fn new(lattice: Lattice) -> Self {
        Self {
            lattice,
            shapes: Vec::new(),
        }
    }

    /// Add a shape given by name and perimeter
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is invalid or the name is already taken.
    pub fn with_shape(mut self, name: &str, perimeter: &[Point]) -> Result<Self> {
        if self.get(name).is_some() {
            return Err(CoverError::InvalidShape {
                name: name.to_string(),
                reason: "duplicate piece name".to_string(),
            });
        }

        self.shapes
            .push(Shape::new(self.lattice, name, perimeter.to_vec())?);
        Ok(self)
    }

    /// Build a catalogue from `(name, perimeter)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if any shape is invalid or names repeat.
    pub fn from_perimeters(lattice: Lattice, entries: &[(&str, &[Point])]) -> Result<Self> {
        entries
            .iter()
            .try_fold(Self::new(lattice), |catalogue, (name, perimeter)| {
                catalogue.with_shape(name, perimeter)
            })
    }

    /// The twelve free hexiamonds
    ///
    /// # Errors
    ///
    /// Never fails in practice; the built-in outlines are validated like any other.
    pub fn hexiamonds() -> Result<Self> {
        Self::from_perimeters(Lattice::Triangular, &HEXIAMONDS)
    }

    /// The twelve free pentominoes
    ///
    /// # Errors
    ///
    /// Never fails in practice; the built-in outlines are validated like any other.
    pub fn pentominoes() -> Result<Self> {
        Self::from_perimeters(Lattice::Square, &PENTOMINOES)
    }

    /// Lattice every shape lives on
    pub const fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// Shapes in insertion order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Look up a shape by name
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.name == name)
    }

    /// Number of shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Test whether the catalogue holds no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total number of cells over all shapes
    pub fn total_cells(&self) -> usize {
        self.shapes.iter().map(|shape| shape.cells.len()).sum()
    }
}
