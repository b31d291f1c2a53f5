//! Pruning policies consulted before a candidate row is branched on
//!
//! A policy sees the candidate row and the cells filled so far on the current
//! branch. It must only reject candidates that cannot lead to an acceptable
//! cover; it may accept candidates that fail later.

use crate::algorithm::bitset::IndexSet;
use crate::algorithm::matrix::{ProblemMatrix, Row};
use crate::io::error::{CoverError, Result, invalid_parameter};
use crate::spatial::cells::Cell;
use crate::spatial::lattice::{Lattice, Point};
use crate::spatial::region::Region;
use std::fmt;
use std::str::FromStr;

/// Cells covered on one search branch and the piece covering each
///
/// Indexed by matrix key id. Cloned together with the rest of the branch
/// state, so siblings never see each other's fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledCells {
    owners: Vec<Option<usize>>,
    placed: IndexSet,
    filled: usize,
}

impl FilledCells {
    /// Create an empty map for a matrix with `key_count` keys
    pub fn new(key_count: usize) -> Self {
        Self {
            owners: vec![None; key_count],
            placed: IndexSet::new(key_count),
            filled: 0,
        }
    }

    /// Record a row's cells as covered by the row's piece
    pub fn fill(&mut self, row: &Row) {
        let Some((&piece, cells)) = row.keys.split_first() else {
            return;
        };
        self.placed.insert(piece);
        for &cell in cells {
            if let Some(owner) = self.owners.get_mut(cell) {
                if owner.is_none() {
                    self.filled += 1;
                }
                *owner = Some(piece);
            }
        }
    }

    /// Piece key covering a cell key, if any
    pub fn owner(&self, cell: usize) -> Option<usize> {
        self.owners.get(cell).copied().flatten()
    }

    /// Test whether a cell key is covered
    pub fn is_filled(&self, cell: usize) -> bool {
        self.owner(cell).is_some()
    }

    /// Test whether a piece key has been placed on this branch
    pub fn is_placed(&self, piece: usize) -> bool {
        self.placed.contains(piece)
    }

    /// Number of covered cells
    pub const fn filled_count(&self) -> usize {
        self.filled
    }
}

/// A necessary condition checked on every candidate row
pub trait PruningPolicy: fmt::Debug {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Test whether the candidate must not be placed on this branch
    fn rejects(&self, candidate: &Row, filled: &FilledCells) -> bool;
}

/// Key ids of a row's cells, without the leading piece key
fn row_cells(row: &Row) -> &[usize] {
    row.keys.get(1..).unwrap_or(&[])
}

/// Rejects placements that would complete a fully covered 2x2 block
#[derive(Debug, Clone)]
pub struct BlockPolicy {
    blocks: Vec<[usize; 4]>,
    blocks_by_cell: Vec<Vec<usize>>,
}

impl BlockPolicy {
    /// Precompute the 2x2 blocks lying entirely inside the region
    ///
    /// # Errors
    ///
    /// Returns an error if the region is not on the square lattice
    pub fn new(matrix: &ProblemMatrix, region: &Region) -> Result<Self> {
        if region.lattice() != Lattice::Square {
            return Err(invalid_parameter(
                "forbid_filled_blocks",
                &region.lattice(),
                &"2x2 blocks exist only on the square lattice",
            ));
        }

        let mut blocks = Vec::new();
        let mut blocks_by_cell = vec![Vec::new(); matrix.key_count()];

        for cell in region.cells() {
            let [x, y] = cell.anchor();
            let corners = [[x, y], [x + 1, y], [x, y + 1], [x + 1, y + 1]];
            let keys: Option<Vec<usize>> = corners
                .iter()
                .map(|&corner| matrix.cell_key(&Cell::square(corner)))
                .collect();
            let Some(&[a, b, c, d]) = keys.as_deref() else {
                continue;
            };
            let block = [a, b, c, d];

            let id = blocks.len();
            for key in block {
                if let Some(list) = blocks_by_cell.get_mut(key) {
                    list.push(id);
                }
            }
            blocks.push(block);
        }

        Ok(Self {
            blocks,
            blocks_by_cell,
        })
    }

    /// Number of 2x2 blocks inside the region
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl PruningPolicy for BlockPolicy {
    fn name(&self) -> &'static str {
        "2x2 block"
    }

    fn rejects(&self, candidate: &Row, filled: &FilledCells) -> bool {
        let cells = row_cells(candidate);
        // Only blocks touching the candidate can become full now
        cells.iter().any(|&cell| {
            self.blocks_by_cell
                .get(cell)
                .into_iter()
                .flatten()
                .filter_map(|&id| self.blocks.get(id))
                .any(|block| {
                    block
                        .iter()
                        .all(|key| cells.contains(key) || filled.is_filled(*key))
                })
        })
    }
}

/// A directional clue: walking from `start` along `direction`, the first
/// covered cell must belong to `piece`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    /// Piece key the clue names
    pub piece: String,
    /// Cell the walk starts on
    pub start: Cell,
    /// Lattice vector added at each step
    pub direction: Point,
}

impl Clue {
    /// Create a clue
    pub fn new(piece: impl Into<String>, start: Cell, direction: Point) -> Self {
        Self {
            piece: piece.into(),
            start,
            direction,
        }
    }
}

fn parse_point(text: &str) -> Option<Point> {
    let (a, b) = text.split_once(',')?;
    Some([a.trim().parse().ok()?, b.trim().parse().ok()?])
}

fn parse_cell(text: &str) -> Option<Cell> {
    if text.contains(';') {
        let corners: Vec<Point> = text.split(';').map(parse_point).collect::<Option<_>>()?;
        match corners.as_slice() {
            &[a, b, c] => Some(Cell::triangle(a, b, c)),
            _ => None,
        }
    } else {
        parse_point(text).map(Cell::square)
    }
}

impl FromStr for Clue {
    type Err = CoverError;

    /// Parse `NAME:CELL:DX,DY`, where `CELL` is `x,y` for a square or
    /// `a,b;c,d;e,f` for a triangle
    fn from_str(text: &str) -> Result<Self> {
        let malformed = |reason: &str| invalid_parameter("clue", &text, &reason);

        let mut parts = text.split(':');
        let (Some(piece), Some(cell), Some(direction), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed("expected NAME:CELL:DX,DY"));
        };

        let piece = piece.trim();
        if piece.is_empty() {
            return Err(malformed("piece name is empty"));
        }
        let start = parse_cell(cell).ok_or_else(|| malformed("cell is not x,y or a,b;c,d;e,f"))?;
        let direction = parse_point(direction).ok_or_else(|| malformed("direction is not dx,dy"))?;

        Ok(Self::new(piece, start, direction))
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {} towards ({}, {})",
            self.piece, self.start, self.direction[0], self.direction[1]
        )
    }
}

/// A clue resolved against a matrix: piece key id and the ray's cell keys
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedClue {
    piece: usize,
    ray: Vec<usize>,
}

/// Rejects placements that put another piece first on a clue's ray
#[derive(Debug, Clone)]
pub struct CluePolicy {
    clues: Vec<ResolvedClue>,
}

impl CluePolicy {
    /// Resolve clues to key ids, walking each ray until it leaves the region
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A clue names a piece key the matrix does not have
    /// - A clue starts outside the region
    /// - A clue's direction is the zero vector
    pub fn new(matrix: &ProblemMatrix, region: &Region, clues: &[Clue]) -> Result<Self> {
        let mut resolved = Vec::with_capacity(clues.len());

        for clue in clues {
            let piece = matrix
                .piece_key(&clue.piece)
                .ok_or_else(|| invalid_parameter("clue", clue, &"no piece with that name"))?;

            if !region.contains_cell(&clue.start) {
                return Err(CoverError::ClueOutsideRegion {
                    piece: clue.piece.clone(),
                    cell: clue.start,
                });
            }
            if clue.direction == [0, 0] {
                return Err(invalid_parameter("clue", clue, &"direction must be non-zero"));
            }

            let mut ray = Vec::new();
            let mut cell = clue.start;
            while let Some(key) = matrix.cell_key(&cell) {
                ray.push(key);
                cell = cell.translated(clue.direction);
            }

            resolved.push(ResolvedClue { piece, ray });
        }

        Ok(Self { clues: resolved })
    }

    /// Number of active clues
    pub fn len(&self) -> usize {
        self.clues.len()
    }

    /// Test whether no clue is active
    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }
}

impl PruningPolicy for CluePolicy {
    fn name(&self) -> &'static str {
        "clue"
    }

    fn rejects(&self, candidate: &Row, filled: &FilledCells) -> bool {
        let Some(&piece) = candidate.keys.first() else {
            return false;
        };
        let cells = row_cells(candidate);

        self.clues
            .iter()
            .filter(|clue| clue.piece == piece || filled.is_placed(clue.piece))
            .any(|clue| {
                let first_owner = clue.ray.iter().find_map(|&key| {
                    if cells.contains(&key) {
                        Some(piece)
                    } else {
                        filled.owner(key)
                    }
                });
                first_owner.is_some_and(|owner| owner != clue.piece)
            })
    }
}
