//! Algorithm X over a [`ProblemMatrix`] with pruning hooks
//!
//! Each branch owns a [`PartialSolution`] value. Choosing a row clones the
//! parent state and edits the clone, so a sibling or the parent never sees a
//! child's bookkeeping. Branching always picks the open primary key with the
//! fewest live rows, taking the smallest key index on ties.

use crate::algorithm::bitset::IndexSet;
use crate::algorithm::matrix::ProblemMatrix;
use crate::algorithm::pruning::{FilledCells, PruningPolicy};
use crate::io::error::{Result, invariant_violation};
use std::fmt;

/// Where the search stands after visiting a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// Branches remain to be explored
    Searching,
    /// A complete cover was emitted at this node
    SolutionFound,
    /// Every branch was explored
    Exhausted,
    /// The solution limit was reached; the search stopped early
    Capped,
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Searching => write!(f, "searching"),
            Self::SolutionFound => write!(f, "solution found"),
            Self::Exhausted => write!(f, "exhausted"),
            Self::Capped => write!(f, "capped"),
        }
    }
}

/// Counters accumulated while searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Search nodes visited, the root included
    pub nodes: u64,
    /// Candidate rows rejected by a pruning policy
    pub pruned: u64,
    /// Nodes whose branching key had no live row left
    pub dead_ends: u64,
    /// Covers emitted
    pub covers: usize,
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} covers, {} nodes, {} pruned, {} dead ends",
            self.covers, self.nodes, self.pruned, self.dead_ends
        )
    }
}

/// Observer notified as the search proceeds
pub trait SearchMonitor {
    /// Called once per visited node
    fn node_visited(&mut self, _statistics: &SearchStatistics) {}

    /// Called after each emitted cover
    fn solution_found(&mut self, _statistics: &SearchStatistics) {}
}

/// Monitor that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentMonitor;

impl SearchMonitor for SilentMonitor {}

/// Result of one search run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Emitted covers as row indices in choice order
    pub solutions: Vec<Vec<usize>>,
    /// `Exhausted` or `Capped`
    pub state: SearchState,
    /// Counters for the whole run
    pub statistics: SearchStatistics,
}

/// Search state owned by one branch
#[derive(Debug, Clone)]
pub struct PartialSolution {
    chosen: Vec<usize>,
    live_rows: IndexSet,
    remaining: Vec<usize>,
    open: IndexSet,
    filled: FilledCells,
}

impl PartialSolution {
    /// State before any row is chosen
    pub fn root(matrix: &ProblemMatrix) -> Self {
        let remaining = (0..matrix.key_count())
            .map(|key| {
                if matrix.is_primary(key) {
                    matrix.column(key).len()
                } else {
                    0
                }
            })
            .collect();

        Self {
            chosen: Vec::new(),
            live_rows: IndexSet::full(matrix.row_count()),
            remaining,
            open: matrix.primary_keys().clone(),
            filled: FilledCells::new(matrix.key_count()),
        }
    }

    /// Rows chosen so far, in choice order
    pub fn chosen(&self) -> &[usize] {
        &self.chosen
    }

    /// Cells covered on this branch
    pub const fn filled(&self) -> &FilledCells {
        &self.filled
    }

    /// Test whether every primary key is satisfied
    pub fn is_complete(&self) -> bool {
        self.open.is_empty()
    }

    /// Test whether a row is still compatible with the chosen rows
    pub fn is_live(&self, row: usize) -> bool {
        self.live_rows.contains(row)
    }

    /// Live rows satisfying an open primary key
    pub fn remaining_count(&self, key: usize) -> Option<usize> {
        if self.open.contains(key) {
            self.remaining.get(key).copied()
        } else {
            None
        }
    }

    /// Open primary key with the fewest live rows, and that count
    pub fn choose_key(&self) -> Option<(usize, usize)> {
        self.open
            .iter()
            .map(|key| (key, self.remaining.get(key).copied().unwrap_or(0)))
            .min_by_key(|&(_, count)| count)
    }

    /// Live rows containing a key, in row order
    pub fn candidates<'a>(
        &'a self,
        matrix: &'a ProblemMatrix,
        key: usize,
    ) -> impl Iterator<Item = usize> + 'a {
        matrix
            .column(key)
            .iter()
            .copied()
            .filter(|&row| self.live_rows.contains(row))
    }

    /// Child state with one more row chosen
    ///
    /// Every live row sharing a key with the chosen row is dropped and the
    /// counts of its primary keys decremented. The chosen row's own primary
    /// keys must then have no live row left and are closed.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if a count would go negative or a
    /// closed key still has live rows.
    pub fn with_row(&self, matrix: &ProblemMatrix, row: usize) -> Result<Self> {
        let chosen_row = matrix
            .row(row)
            .ok_or_else(|| invariant_violation("row selection", &format!("row {row} does not exist")))?;
        if !self.live_rows.contains(row) {
            return Err(invariant_violation(
                "row selection",
                &format!("row {row} conflicts with an earlier choice"),
            ));
        }

        let mut child = self.clone();
        child.chosen.push(row);

        for &key in &chosen_row.keys {
            for &conflicting in matrix.column(key) {
                if !child.live_rows.remove(conflicting) {
                    continue;
                }
                let Some(removed) = matrix.row(conflicting) else {
                    continue;
                };
                for &removed_key in &removed.keys {
                    if !matrix.is_primary(removed_key) {
                        continue;
                    }
                    let count = child.remaining.get_mut(removed_key).ok_or_else(|| {
                        invariant_violation("row removal", &format!("key {removed_key} has no count"))
                    })?;
                    *count = count.checked_sub(1).ok_or_else(|| {
                        invariant_violation(
                            "row removal",
                            &format!("count of key {removed_key} went negative"),
                        )
                    })?;
                }
            }
        }

        for &key in &chosen_row.keys {
            if !matrix.is_primary(key) {
                continue;
            }
            let count = child.remaining.get(key).copied().unwrap_or(0);
            if count != 0 {
                return Err(invariant_violation(
                    "key closing",
                    &format!("key {key} still has {count} live rows after its row was chosen"),
                ));
            }
            child.open.remove(key);
        }

        child.filled.fill(chosen_row);
        Ok(child)
    }
}

struct Search<'a> {
    matrix: &'a ProblemMatrix,
    policies: &'a [Box<dyn PruningPolicy>],
    max_solutions: Option<usize>,
    monitor: &'a mut dyn SearchMonitor,
    solutions: Vec<Vec<usize>>,
    statistics: SearchStatistics,
}

impl Search<'_> {
    fn explore(&mut self, partial: &PartialSolution) -> Result<SearchState> {
        let matrix = self.matrix;
        self.statistics.nodes += 1;
        self.monitor.node_visited(&self.statistics);

        if partial.is_complete() {
            self.solutions.push(partial.chosen().to_vec());
            self.statistics.covers += 1;
            self.monitor.solution_found(&self.statistics);

            if self
                .max_solutions
                .is_some_and(|max| self.solutions.len() >= max)
            {
                return Ok(SearchState::Capped);
            }
            return Ok(SearchState::SolutionFound);
        }

        let Some((key, count)) = partial.choose_key() else {
            return Ok(SearchState::Searching);
        };
        if count == 0 {
            self.statistics.dead_ends += 1;
            return Ok(SearchState::Searching);
        }

        let candidates: Vec<usize> = partial.candidates(matrix, key).collect();
        for row_id in candidates {
            let row = matrix.row(row_id).ok_or_else(|| {
                invariant_violation("search", &format!("row {row_id} does not exist"))
            })?;

            if self
                .policies
                .iter()
                .any(|policy| policy.rejects(row, partial.filled()))
            {
                self.statistics.pruned += 1;
                continue;
            }

            let child = partial.with_row(matrix, row_id)?;
            if self.explore(&child)? == SearchState::Capped {
                return Ok(SearchState::Capped);
            }
        }

        Ok(SearchState::Searching)
    }
}

/// Enumerate exact covers of a matrix depth first
///
/// Covers are emitted in a deterministic order. The run stops once
/// `max_solutions` covers have been emitted; `Some(0)` returns at once
/// without exploring.
///
/// # Errors
///
/// Returns an invariant violation if matrix bookkeeping breaks. An empty
/// result is not an error.
pub fn search(
    matrix: &ProblemMatrix,
    policies: &[Box<dyn PruningPolicy>],
    max_solutions: Option<usize>,
    monitor: &mut dyn SearchMonitor,
) -> Result<SearchOutcome> {
    if max_solutions == Some(0) {
        return Ok(SearchOutcome {
            solutions: Vec::new(),
            state: SearchState::Capped,
            statistics: SearchStatistics::default(),
        });
    }

    let mut search = Search {
        matrix,
        policies,
        max_solutions,
        monitor,
        solutions: Vec::new(),
        statistics: SearchStatistics::default(),
    };

    let state = match search.explore(&PartialSolution::root(matrix))? {
        SearchState::Capped => SearchState::Capped,
        _ => SearchState::Exhausted,
    };

    Ok(SearchOutcome {
        solutions: search.solutions,
        state,
        statistics: search.statistics,
    })
}
