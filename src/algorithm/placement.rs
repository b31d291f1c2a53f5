//! Placement enumeration: every translate of every orientation inside a region
//!
//! Candidates are found by moving the orientation's first perimeter point
//! onto each of the region's lattice points. Every point of a valid placement
//! is a region point, so this reaches every translate. A candidate's
//! perimeter must land on region points before its cells are translated and
//! checked, which rejects most candidates without touching cell sets.

use crate::algorithm::orientation::{Orientation, orientations};
use crate::io::configuration::MIRRORED_SUFFIX;
use crate::spatial::cells::{Cell, translate_cells};
use crate::spatial::lattice::{Point, displacement, translate, translate_path};
use crate::spatial::region::Region;
use crate::spatial::shapes::Catalogue;
use std::collections::BTreeSet;

/// How reflected orientations of chiral pieces enter the problem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum MirrorHandling {
    /// Mirror images are further orientations of the same piece
    #[default]
    Free,
    /// A chiral piece's mirror family is a separate piece used exactly once
    Distinct,
    /// Only proper rotations are placed
    Excluded,
}

/// Orientations that share one piece-identity key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceFamily {
    /// Piece key name, suffixed for a distinct mirror family
    pub name: String,
    /// Orientations available to the family
    pub orientations: Vec<Orientation>,
}

/// One orientation translated to a position inside the region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Piece key the placement belongs to
    pub piece: String,
    /// Translated perimeter path
    pub perimeter: Vec<Point>,
    /// Translated cells, all inside the region
    pub cells: BTreeSet<Cell>,
    /// Whether the orientation was reflected
    pub mirrored: bool,
}

/// Placements of one piece family in generation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiecePlacements {
    /// Piece key name
    pub piece: String,
    /// Every valid placement of the family
    pub placements: Vec<Placement>,
}

/// Group each catalogue shape's orientations into piece families
///
/// Families come in catalogue order; a distinct mirror family directly
/// follows its proper family.
pub fn piece_families(catalogue: &Catalogue, mirror_handling: MirrorHandling) -> Vec<PieceFamily> {
    let lattice = catalogue.lattice();
    let mut families = Vec::with_capacity(catalogue.len());

    for shape in catalogue.shapes() {
        let set = orientations(lattice, shape);
        match mirror_handling {
            MirrorHandling::Free => families.push(PieceFamily {
                name: shape.name().to_string(),
                orientations: set.iter().cloned().collect(),
            }),
            MirrorHandling::Distinct => {
                let chiral = set.is_chiral();
                families.push(PieceFamily {
                    name: shape.name().to_string(),
                    orientations: set.proper,
                });
                if chiral {
                    families.push(PieceFamily {
                        name: format!("{}{MIRRORED_SUFFIX}", shape.name()),
                        orientations: set.mirrored,
                    });
                }
            }
            MirrorHandling::Excluded => families.push(PieceFamily {
                name: shape.name().to_string(),
                orientations: set.proper,
            }),
        }
    }

    families
}

/// Enumerate every placement of one orientation inside a region
///
/// Anchors are visited in sorted point order, so the output order is stable.
/// Distinct anchors give distinct vectors and hence distinct cell sets, so no
/// deduplication is needed.
pub fn placements(region: &Region, orientation: &Orientation, piece: &str) -> Vec<Placement> {
    let Some(&origin) = orientation.perimeter.first() else {
        return Vec::new();
    };

    region
        .points()
        .iter()
        .filter_map(|&anchor| place_at(region, orientation, piece, displacement(origin, anchor)))
        .collect()
}

fn place_at(
    region: &Region,
    orientation: &Orientation,
    piece: &str,
    vector: Point,
) -> Option<Placement> {
    if !orientation
        .perimeter
        .iter()
        .all(|&point| region.contains_point(&translate(point, vector)))
    {
        return None;
    }

    let cells = translate_cells(&orientation.cells, vector);
    if !cells.iter().all(|cell| region.contains_cell(cell)) {
        return None;
    }

    Some(Placement {
        piece: piece.to_string(),
        perimeter: translate_path(&orientation.perimeter, vector),
        cells,
        mirrored: orientation.mirrored,
    })
}

/// Enumerate the placements of every piece family of a catalogue
pub fn placements_by_piece(
    region: &Region,
    catalogue: &Catalogue,
    mirror_handling: MirrorHandling,
) -> Vec<PiecePlacements> {
    piece_families(catalogue, mirror_handling)
        .into_iter()
        .map(|family| PiecePlacements {
            placements: family
                .orientations
                .iter()
                .flat_map(|orientation| placements(region, orientation, &family.name))
                .collect(),
            piece: family.name,
        })
        .collect()
}
