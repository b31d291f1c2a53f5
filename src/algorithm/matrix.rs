//! Exact-cover matrix construction from placements
//!
//! Every placement becomes one row holding its piece-identity key and the
//! cell key of each cell it covers. Keys and rows are numbered densely in
//! construction order; that order is what the search iterates, so it is kept
//! deterministic.

use crate::algorithm::bitset::IndexSet;
use crate::algorithm::placement::{Placement, PiecePlacements};
use crate::io::error::{CoverError, Result, invariant_violation};
use crate::spatial::cells::Cell;
use crate::spatial::region::Region;
use std::collections::HashMap;
use std::fmt;

/// A constraint column of the exact-cover matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKey {
    /// The named piece must be used exactly once
    Piece(String),
    /// The cell must be covered (exactly once, or at most once when packing)
    Cell(Cell),
}

impl ConstraintKey {
    /// Piece name for a piece-identity key
    pub fn piece_name(&self) -> Option<&str> {
        match self {
            Self::Piece(name) => Some(name),
            Self::Cell(_) => None,
        }
    }

    /// Cell for a cell key
    pub const fn cell(&self) -> Option<&Cell> {
        match self {
            Self::Piece(_) => None,
            Self::Cell(cell) => Some(cell),
        }
    }

    /// Test whether this is a piece-identity key
    pub const fn is_piece(&self) -> bool {
        matches!(self, Self::Piece(_))
    }
}

impl fmt::Display for ConstraintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Piece(name) => write!(f, "piece '{name}'"),
            Self::Cell(cell) => write!(f, "{cell}"),
        }
    }
}

/// Which keys must be satisfied exactly once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum CoverMode {
    /// Every piece used once and every region cell covered once
    #[default]
    Exact,
    /// Every piece used once; cells covered at most once
    Packing,
}

/// One placement read as the set of constraint keys it satisfies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// The placement this row stands for
    pub placement: Placement,
    /// Key indices; the piece-identity key comes first
    pub keys: Vec<usize>,
}

/// Rows, keys and per-key row lists of one cover problem
#[derive(Debug, Clone)]
pub struct ProblemMatrix {
    mode: CoverMode,
    keys: Vec<ConstraintKey>,
    key_ids: HashMap<ConstraintKey, usize>,
    rows: Vec<Row>,
    columns: Vec<Vec<usize>>,
    primary: IndexSet,
}

impl ProblemMatrix {
    /// Build the matrix for a region from per-piece placements
    ///
    /// Piece keys are numbered first in family order, then cell keys in
    /// sorted cell order, then rows in placement order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A piece family has no placement inside the region
    /// - Two families share a name
    /// - In exact mode, some region cell is covered by no placement
    pub fn build(region: &Region, pieces: Vec<PiecePlacements>, mode: CoverMode) -> Result<Self> {
        let mut matrix = Self {
            mode,
            keys: Vec::new(),
            key_ids: HashMap::new(),
            rows: Vec::new(),
            columns: Vec::new(),
            primary: IndexSet::new(0),
        };

        for family in &pieces {
            if family.placements.is_empty() {
                return Err(CoverError::UnplaceablePiece {
                    piece: family.piece.clone(),
                });
            }
            let key = ConstraintKey::Piece(family.piece.clone());
            if matrix.key_ids.contains_key(&key) {
                return Err(CoverError::InvalidShape {
                    name: family.piece.clone(),
                    reason: "piece key is used by more than one family".to_string(),
                });
            }
            matrix.intern(key);
        }

        for cell in region.cells() {
            matrix.intern(ConstraintKey::Cell(*cell));
        }

        let mut covered = IndexSet::new(matrix.keys.len());
        for family in pieces {
            let piece_key = matrix.piece_key(&family.piece).ok_or_else(|| {
                invariant_violation("matrix construction", &"piece key vanished")
            })?;

            for placement in family.placements {
                let mut keys = Vec::with_capacity(placement.cells.len() + 1);
                keys.push(piece_key);
                for cell in &placement.cells {
                    let key = matrix.cell_key(cell).ok_or_else(|| {
                        invariant_violation(
                            "matrix construction",
                            &format!("placement of '{}' leaves the region at {cell}", family.piece),
                        )
                    })?;
                    covered.insert(key);
                    keys.push(key);
                }

                let row = matrix.rows.len();
                for &key in &keys {
                    if let Some(column) = matrix.columns.get_mut(key) {
                        column.push(row);
                    }
                }
                matrix.rows.push(Row { placement, keys });
            }
        }

        matrix.primary = match mode {
            CoverMode::Exact => {
                if covered.count() != region.cell_count() {
                    let missing = region
                        .cells()
                        .iter()
                        .find(|cell| matrix.cell_key(cell).is_none_or(|key| !covered.contains(key)));
                    return Err(match missing {
                        Some(cell) => CoverError::UncoverableCell { cell: *cell },
                        None => invariant_violation(
                            "matrix construction",
                            &"cell key count disagrees with the region",
                        ),
                    });
                }
                IndexSet::full(matrix.keys.len())
            }
            CoverMode::Packing => {
                let mut primary = IndexSet::new(matrix.keys.len());
                for (id, key) in matrix.keys.iter().enumerate() {
                    if key.is_piece() {
                        primary.insert(id);
                    }
                }
                primary
            }
        };

        Ok(matrix)
    }

    fn intern(&mut self, key: ConstraintKey) -> usize {
        if let Some(&id) = self.key_ids.get(&key) {
            return id;
        }
        let id = self.keys.len();
        self.key_ids.insert(key.clone(), id);
        self.keys.push(key);
        self.columns.push(Vec::new());
        id
    }

    /// Cover mode the matrix was built for
    pub const fn mode(&self) -> CoverMode {
        self.mode
    }

    /// All keys in index order
    pub fn keys(&self) -> &[ConstraintKey] {
        &self.keys
    }

    /// Key by index
    pub fn key(&self, id: usize) -> Option<&ConstraintKey> {
        self.keys.get(id)
    }

    /// Index of a key
    pub fn key_id(&self, key: &ConstraintKey) -> Option<usize> {
        self.key_ids.get(key).copied()
    }

    /// Index of a piece-identity key
    pub fn piece_key(&self, name: &str) -> Option<usize> {
        self.key_id(&ConstraintKey::Piece(name.to_string()))
    }

    /// Index of a cell key
    pub fn cell_key(&self, cell: &Cell) -> Option<usize> {
        self.key_id(&ConstraintKey::Cell(*cell))
    }

    /// All rows in index order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row by index
    pub fn row(&self, id: usize) -> Option<&Row> {
        self.rows.get(id)
    }

    /// Rows containing a key, in ascending order
    pub fn column(&self, key: usize) -> &[usize] {
        self.columns.get(key).map_or(&[], Vec::as_slice)
    }

    /// Test whether a key must be satisfied exactly once
    pub fn is_primary(&self, key: usize) -> bool {
        self.primary.contains(key)
    }

    /// Set of primary keys
    pub const fn primary_keys(&self) -> &IndexSet {
        &self.primary
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of keys
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of piece-identity keys
    pub fn piece_key_count(&self) -> usize {
        self.keys.iter().filter(|key| key.is_piece()).count()
    }

    /// Number of cell keys
    pub fn cell_key_count(&self) -> usize {
        self.keys.len() - self.piece_key_count()
    }
}
