//! Orientation generation under the lattice's rotation and reflection group
//!
//! Orientations are deduplicated by their derived cell sets rather than by
//! their perimeter paths: rotating a symmetric piece can yield a path that
//! starts at a different vertex yet encloses exactly the same cells.

use crate::spatial::cells::{Cell, derive_cells};
use crate::spatial::lattice::{Lattice, Point, normalize, reflect_path, rotate_path};
use crate::spatial::shapes::Shape;
use std::collections::{BTreeSet, HashSet};

/// One symmetry image of a shape, normalized to the origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orientation {
    /// Normalized perimeter path
    pub perimeter: Vec<Point>,
    /// Cells enclosed by the perimeter
    pub cells: BTreeSet<Cell>,
    /// Whether a reflection produced this orientation
    pub mirrored: bool,
}

/// Distinct orientations of a shape split by how they were produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrientationSet {
    /// Orientations reachable by rotation alone
    pub proper: Vec<Orientation>,
    /// Orientations that need a reflection, empty for achiral shapes
    pub mirrored: Vec<Orientation>,
}

impl OrientationSet {
    /// Total number of distinct orientations
    pub fn len(&self) -> usize {
        self.proper.len() + self.mirrored.len()
    }

    /// Test whether the set holds no orientations
    pub fn is_empty(&self) -> bool {
        self.proper.is_empty() && self.mirrored.is_empty()
    }

    /// Test whether the shape differs from its mirror image
    pub fn is_chiral(&self) -> bool {
        !self.mirrored.is_empty()
    }

    /// All orientations, proper ones first
    pub fn iter(&self) -> impl Iterator<Item = &Orientation> {
        self.proper.iter().chain(self.mirrored.iter())
    }
}

/// Accumulates orientations, rejecting cell sets already produced
struct OrientationCollector {
    lattice: Lattice,
    seen: HashSet<BTreeSet<Cell>>,
}

impl OrientationCollector {
    fn new(lattice: Lattice) -> Self {
        Self {
            lattice,
            seen: HashSet::new(),
        }
    }

    /// Normalize a path, derive its cells and keep it when unseen
    fn admit(&mut self, path: &[Point], mirrored: bool) -> Option<Orientation> {
        let perimeter = normalize(path);
        let cells = derive_cells(self.lattice, &perimeter);

        self.seen.insert(cells.clone()).then_some(Orientation {
            perimeter,
            cells,
            mirrored,
        })
    }
}

/// Generate the distinct orientations of a shape
///
/// Rotation steps `0..N` (N being the lattice's rotation order) come first in
/// that order, followed by reflections of the retained rotations. A
/// reflection is kept only if its cells differ from every orientation seen so
/// far, so a shape with a mirror axis yields no mirrored orientations.
pub fn orientations(lattice: Lattice, shape: &Shape) -> OrientationSet {
    let mut collector = OrientationCollector::new(lattice);
    let mut set = OrientationSet::default();

    let mut path = shape.perimeter().to_vec();
    for _ in 0..lattice.rotation_order() {
        if let Some(orientation) = collector.admit(&path, false) {
            set.proper.push(orientation);
        }
        path = rotate_path(lattice, &path);
    }

    let reflections: Vec<Vec<Point>> = set
        .proper
        .iter()
        .map(|orientation| reflect_path(lattice, &orientation.perimeter))
        .collect();

    for reflected in reflections {
        if let Some(orientation) = collector.admit(&reflected, true) {
            set.mirrored.push(orientation);
        }
    }

    set
}
