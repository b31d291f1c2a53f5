//! Lattice coordinates and the symmetry operations acting on them
//!
//! Points are integer pairs. On the square lattice they are plain `(x, y)`
//! coordinates; on the triangular lattice `(a, b)` stands for the Eisenstein
//! integer `a + b*w`, where `w` is a primitive cube root of unity.

use std::collections::HashSet;
use std::fmt;

/// A point of a two-dimensional lattice
pub type Point = [i32; 2];

const SQUARE_STEPS: [Point; 4] = [[1, 0], [0, 1], [-1, 0], [0, -1]];

// Counter-clockwise around a point, starting east
const TRIANGULAR_STEPS: [Point; 6] = [[1, 0], [1, 1], [0, 1], [-1, 0], [-1, -1], [0, -1]];

/// The lattice a region and its pieces live on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lattice {
    /// Unit squares; polyominoes
    Square,
    /// Unit equilateral triangles; polyiamonds
    Triangular,
}

impl Lattice {
    /// Number of distinct rotations in the lattice's rotation group
    pub const fn rotation_order(self) -> usize {
        match self {
            Self::Square => 4,
            Self::Triangular => 6,
        }
    }

    /// Rotate a point about the origin by the lattice's elementary angle
    ///
    /// 90° counter-clockwise on the square lattice, 60° counter-clockwise on
    /// the triangular lattice (multiplication by `1 + w`).
    pub const fn rotate(self, point: Point) -> Point {
        match self {
            Self::Square => [-point[1], point[0]],
            Self::Triangular => [point[0] - point[1], point[0]],
        }
    }

    /// Reflect a point across the lattice's fixed mirror line through the origin
    ///
    /// The diagonal `x = y` on the square lattice and the line spanned by
    /// `1 + w` on the triangular lattice; both swap the two coordinates.
    pub const fn reflect(self, point: Point) -> Point {
        [point[1], point[0]]
    }

    /// Unit steps joining a point to its lattice neighbours
    pub const fn unit_steps(self) -> &'static [Point] {
        match self {
            Self::Square => &SQUARE_STEPS,
            Self::Triangular => &TRIANGULAR_STEPS,
        }
    }

    /// Test whether two points are joined by a single lattice edge
    pub fn is_adjacent(self, from: Point, to: Point) -> bool {
        let step = [to[0] - from[0], to[1] - from[1]];
        self.unit_steps().contains(&step)
    }

    /// Map a lattice point to Cartesian coordinates with unit edge length
    pub fn to_cartesian(self, point: Point) -> [f64; 2] {
        let a = f64::from(point[0]);
        let b = f64::from(point[1]);
        match self {
            Self::Square => [a, b],
            Self::Triangular => [b.mul_add(-0.5, a), b * 3.0_f64.sqrt() / 2.0],
        }
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square => write!(f, "square"),
            Self::Triangular => write!(f, "triangular"),
        }
    }
}

/// Add a translation vector to a point
pub const fn translate(point: Point, vector: Point) -> Point {
    [point[0] + vector[0], point[1] + vector[1]]
}

/// Vector carrying one point onto another
pub const fn displacement(from: Point, to: Point) -> Point {
    [to[0] - from[0], to[1] - from[1]]
}

/// Translate every point of a path by the same vector
pub fn translate_path(path: &[Point], vector: Point) -> Vec<Point> {
    path.iter().map(|&point| translate(point, vector)).collect()
}

/// Rotate every point of a path by the lattice's elementary angle
pub fn rotate_path(lattice: Lattice, path: &[Point]) -> Vec<Point> {
    path.iter().map(|&point| lattice.rotate(point)).collect()
}

/// Reflect every point of a path across the lattice's mirror line
pub fn reflect_path(lattice: Lattice, path: &[Point]) -> Vec<Point> {
    path.iter().map(|&point| lattice.reflect(point)).collect()
}

/// Component-wise minimum and maximum of a point sequence
///
/// Returns `None` for an empty sequence.
pub fn bounds<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<(Point, Point)> {
    points.into_iter().fold(None, |acc, point| match acc {
        None => Some((*point, *point)),
        Some((min, max)) => Some((
            [min[0].min(point[0]), min[1].min(point[1])],
            [max[0].max(point[0]), max[1].max(point[1])],
        )),
    })
}

/// Shift points so the per-axis minimum coordinate becomes zero
///
/// Results are canonical up to translation: two paths that differ only by a
/// translation normalize to the same path.
pub fn normalize(path: &[Point]) -> Vec<Point> {
    match bounds(path) {
        Some((min, _)) => translate_path(path, [-min[0], -min[1]]),
        None => Vec::new(),
    }
}

/// Check that a path is a closed, simple walk along lattice edges
///
/// Consecutive points (and the last and first point) must be adjacent and no
/// point may repeat. Since lattice edges only meet at lattice points, a path
/// without repeated points cannot cross itself.
///
/// # Errors
///
/// Returns a description of the first defect found.
pub fn check_closed_path(lattice: Lattice, path: &[Point]) -> std::result::Result<(), String> {
    if path.len() < 3 {
        return Err(format!(
            "a closed path needs at least 3 points, got {}",
            path.len()
        ));
    }

    let mut seen = HashSet::with_capacity(path.len());
    for &point in path {
        if !seen.insert(point) {
            return Err(format!("point {point:?} is visited twice"));
        }
    }

    let closing = path.first().zip(path.last()).map(|(&first, &last)| (last, first));
    let steps = path
        .windows(2)
        .filter_map(|pair| pair.first().copied().zip(pair.get(1).copied()))
        .chain(closing);

    for (from, to) in steps {
        if !lattice.is_adjacent(from, to) {
            return Err(format!("{from:?} and {to:?} are not adjacent lattice points"));
        }
    }

    Ok(())
}
