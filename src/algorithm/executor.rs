use crate::{
    algorithm::matrix::{CoverMode, ProblemMatrix},
    algorithm::placement::{MirrorHandling, placements_by_piece},
    algorithm::pruning::{BlockPolicy, Clue, CluePolicy, PruningPolicy},
    algorithm::search::{SearchMonitor, SearchState, SearchStatistics, SilentMonitor, search},
    algorithm::translation::{Cover, translate_covers},
    io::error::{Result, invalid_parameter},
    spatial::region::Region,
    spatial::shapes::Catalogue,
};

/// Solver parameters controlling the search and its pruning
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Stop after this many covers; `None` searches exhaustively
    pub max_solutions: Option<usize>,
    /// How mirror images of chiral pieces are used
    pub mirror_handling: MirrorHandling,
    /// Whether every region cell must be covered
    pub cover_mode: CoverMode,
    /// Reject covers containing a fully covered 2x2 block
    pub forbid_filled_blocks: bool,
    /// Ray clues every cover must satisfy
    pub clues: Vec<Clue>,
}

/// Covers found by one solve together with how the search ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    /// Covers in emission order
    pub covers: Vec<Cover>,
    /// `Exhausted` or `Capped`
    pub state: SearchState,
    /// Search counters
    pub statistics: SearchStatistics,
}

impl SolveReport {
    /// Test whether the solution limit stopped the search
    pub fn is_capped(&self) -> bool {
        self.state == SearchState::Capped
    }
}

/// A fully prepared cover problem: matrix built, policies resolved
///
/// All configuration errors surface from [`CoverProblem::new`]; solving only
/// fails on a broken internal invariant.
#[derive(Debug)]
pub struct CoverProblem {
    region: Region,
    matrix: ProblemMatrix,
    policies: Vec<Box<dyn PruningPolicy>>,
    config: SolverConfig,
}

impl CoverProblem {
    /// Enumerate placements, build the matrix and set up pruning
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalogue and region use different lattices
    /// - A piece cannot be placed, or (exact mode) a cell cannot be covered
    /// - The 2x2 block policy is requested on a triangular region
    /// - A clue names an unknown piece or starts outside the region
    pub fn new(catalogue: &Catalogue, region: Region, config: SolverConfig) -> Result<Self> {
        if catalogue.lattice() != region.lattice() {
            return Err(invalid_parameter(
                "region",
                &region.lattice(),
                &format!("pieces are on the {} lattice", catalogue.lattice()),
            ));
        }

        let pieces = placements_by_piece(&region, catalogue, config.mirror_handling);
        let matrix = ProblemMatrix::build(&region, pieces, config.cover_mode)?;

        let mut policies: Vec<Box<dyn PruningPolicy>> = Vec::new();
        if config.forbid_filled_blocks {
            policies.push(Box::new(BlockPolicy::new(&matrix, &region)?));
        }
        if !config.clues.is_empty() {
            policies.push(Box::new(CluePolicy::new(&matrix, &region, &config.clues)?));
        }

        Ok(Self {
            region,
            matrix,
            policies,
            config,
        })
    }

    /// Search without progress reporting
    ///
    /// # Errors
    ///
    /// Returns an error only on a broken internal invariant
    pub fn solve(&self) -> Result<SolveReport> {
        self.solve_with_monitor(&mut SilentMonitor)
    }

    /// Search, reporting progress to a monitor
    ///
    /// # Errors
    ///
    /// Returns an error only on a broken internal invariant
    pub fn solve_with_monitor(&self, monitor: &mut dyn SearchMonitor) -> Result<SolveReport> {
        let outcome = search(
            &self.matrix,
            &self.policies,
            self.config.max_solutions,
            monitor,
        )?;
        let covers = translate_covers(&outcome.solutions, &self.matrix)?;

        Ok(SolveReport {
            covers,
            state: outcome.state,
            statistics: outcome.statistics,
        })
    }

    /// The region being covered
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// The exact-cover matrix
    pub const fn matrix(&self) -> &ProblemMatrix {
        &self.matrix
    }

    /// The configuration the problem was built with
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Names of the active pruning policies, in evaluation order
    pub fn policy_names(&self) -> Vec<&'static str> {
        self.policies.iter().map(|policy| policy.name()).collect()
    }
}
