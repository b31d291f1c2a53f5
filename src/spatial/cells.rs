//! Unit cells and the derivation of the cells enclosed by a closed perimeter
//!
//! A cell is identified by its corner points alone, so two cells built from
//! the same corners in a different order compare equal. Triangles store their
//! three corners sorted; squares are named by their minimum corner.

use crate::spatial::lattice::{Lattice, Point, bounds, translate};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// The atomic coverable unit of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cell {
    /// Unit square named by its minimum corner
    Square(Point),
    /// Unit triangle given by its three corners in sorted order
    Triangle([Point; 3]),
}

impl Cell {
    /// Unit square with the given minimum corner
    pub const fn square(corner: Point) -> Self {
        Self::Square(corner)
    }

    /// Unit triangle from three corners in any order
    pub fn triangle(a: Point, b: Point, c: Point) -> Self {
        let mut corners = [a, b, c];
        corners.sort_unstable();
        Self::Triangle(corners)
    }

    /// Lattice the cell belongs to
    pub const fn lattice(&self) -> Lattice {
        match self {
            Self::Square(_) => Lattice::Square,
            Self::Triangle(_) => Lattice::Triangular,
        }
    }

    /// Corner points of the cell, counter-clockwise for squares
    pub fn corners(&self) -> Vec<Point> {
        match *self {
            Self::Square([x, y]) => vec![[x, y], [x + 1, y], [x + 1, y + 1], [x, y + 1]],
            Self::Triangle(corners) => corners.to_vec(),
        }
    }

    /// Minimum corner of the cell
    pub const fn anchor(&self) -> Point {
        match self {
            Self::Square(corner) => *corner,
            Self::Triangle(corners) => corners[0],
        }
    }

    /// The same cell shifted by a lattice vector
    pub fn translated(&self, vector: Point) -> Self {
        match *self {
            Self::Square(corner) => Self::Square(translate(corner, vector)),
            Self::Triangle([a, b, c]) => {
                Self::triangle(translate(a, vector), translate(b, vector), translate(c, vector))
            }
        }
    }

    /// Centroid scaled to integer coordinates, together with the scale factor
    ///
    /// The centroid of a unit cell never lies on a lattice line, which keeps
    /// containment tests against lattice-edge polygons free of ties.
    fn scaled_centroid(&self) -> (Point, i32) {
        match *self {
            Self::Square([x, y]) => ([2 * x + 1, 2 * y + 1], 2),
            Self::Triangle([a, b, c]) => ([a[0] + b[0] + c[0], a[1] + b[1] + c[1]], 3),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square([x, y]) => write!(f, "square ({x}, {y})"),
            Self::Triangle([a, b, c]) => write!(
                f,
                "triangle ({}, {}) ({}, {}) ({}, {})",
                a[0], a[1], b[0], b[1], c[0], c[1]
            ),
        }
    }
}

/// Cells whose minimum corner is the given point
///
/// Every unit cell of the lattice is produced by exactly one anchor.
pub fn cells_anchored_at(lattice: Lattice, anchor: Point) -> Vec<Cell> {
    let [a, b] = anchor;
    match lattice {
        Lattice::Square => vec![Cell::square(anchor)],
        Lattice::Triangular => vec![
            Cell::triangle(anchor, [a + 1, b], [a + 1, b + 1]),
            Cell::triangle(anchor, [a + 1, b + 1], [a, b + 1]),
        ],
    }
}

/// Crossing-number test of a scaled point against a closed lattice path
///
/// `target` is expressed in units of `1 / scale`. The caller guarantees the
/// target is not on the path, so no edge case handling is needed.
fn encloses(perimeter: &[Point], target: Point, scale: i32) -> bool {
    let scale = i64::from(scale);
    let target_a = i64::from(target[0]);
    let target_b = i64::from(target[1]);

    let next_points = perimeter.iter().skip(1).chain(perimeter.first());
    let mut inside = false;

    for (from, to) in perimeter.iter().zip(next_points) {
        let from_a = i64::from(from[0]) * scale;
        let from_b = i64::from(from[1]) * scale;
        let to_a = i64::from(to[0]) * scale;
        let to_b = i64::from(to[1]) * scale;

        if (from_b > target_b) == (to_b > target_b) {
            continue;
        }

        // Is target_a left of the edge's crossing with the horizontal line
        // through the target? Multiply out to keep integer arithmetic.
        let rise = to_b - from_b;
        let offset = (target_b - from_b) * (to_a - from_a);
        let crosses = if rise > 0 {
            target_a * rise < from_a * rise + offset
        } else {
            target_a * rise > from_a * rise + offset
        };

        if crosses {
            inside = !inside;
        }
    }

    inside
}

/// Derive the unit cells enclosed by a closed perimeter path
///
/// Candidates are all cells inside the perimeter's bounding box. Requiring
/// only that a candidate's corners lie on or inside the path overcounts on
/// concave shapes: a triangle spanning a notch has all three corners on the
/// boundary but lies outside. A candidate is therefore kept only when its
/// centroid is strictly inside the path. The test runs in lattice
/// coordinates, which is exact because containment is affine-invariant.
pub fn derive_cells(lattice: Lattice, perimeter: &[Point]) -> BTreeSet<Cell> {
    let Some((min, max)) = bounds(perimeter) else {
        return BTreeSet::new();
    };

    let mut cells = BTreeSet::new();
    for a in min[0]..max[0] {
        for b in min[1]..max[1] {
            for cell in cells_anchored_at(lattice, [a, b]) {
                let (centroid, scale) = cell.scaled_centroid();
                if encloses(perimeter, centroid, scale) {
                    cells.insert(cell);
                }
            }
        }
    }
    cells
}

/// Translate every cell of a set by the same vector
pub fn translate_cells(cells: &BTreeSet<Cell>, vector: Point) -> BTreeSet<Cell> {
    cells.iter().map(|cell| cell.translated(vector)).collect()
}

/// All corner points of a collection of cells
pub fn corner_points<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> HashSet<Point> {
    cells.into_iter().flat_map(Cell::corners).collect()
}
