//! Tests for cover problem setup and solving

#[cfg(test)]
mod tests {
    use polycover::CoverError;
    use polycover::algorithm::executor::{CoverProblem, SolverConfig};
    use polycover::algorithm::matrix::CoverMode;
    use polycover::algorithm::placement::MirrorHandling;
    use polycover::algorithm::pruning::Clue;
    use polycover::algorithm::search::SearchState;
    use polycover::spatial::cells::Cell;
    use polycover::spatial::lattice::{Lattice, Point};
    use polycover::spatial::region::Region;
    use polycover::spatial::shapes::Catalogue;

    const I_TROMINO: [Point; 8] = [
        [0, 0], [1, 0], [2, 0], [3, 0], [3, 1], [2, 1], [1, 1], [0, 1],
    ];

    fn two_bars() -> Catalogue {
        Catalogue::from_perimeters(
            Lattice::Square,
            &[("A", I_TROMINO.as_slice()), ("B", I_TROMINO.as_slice())],
        )
        .expect("bars are valid")
    }

    fn row() -> Region {
        Region::rectangle(6, 1).expect("6x1 rectangle is valid")
    }

    // Tests default configuration: exhaustive, free mirrors, exact, no pruning
    // Verified by defaulting to packing mode
    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.max_solutions, None);
        assert_eq!(config.mirror_handling, MirrorHandling::Free);
        assert_eq!(config.cover_mode, CoverMode::Exact);
        assert!(!config.forbid_filled_blocks);
        assert!(config.clues.is_empty());
    }

    // Tests two bars in a row have two covers, one per order
    // Verified by merging both bars into one piece key
    #[test]
    fn test_solve_two_bars() {
        let problem = CoverProblem::new(&two_bars(), row(), SolverConfig::default())
            .expect("problem builds");
        assert_eq!(problem.matrix().row_count(), 8);
        assert!(problem.policy_names().is_empty());

        let report = problem.solve().expect("solve succeeds");
        assert_eq!(report.covers.len(), 2);
        assert_eq!(report.state, SearchState::Exhausted);
        assert!(!report.is_capped());
        assert_eq!(report.statistics.covers, 2);
    }

    // Tests the solution limit is reported as capped
    // Verified by ignoring max_solutions in solve
    #[test]
    fn test_solve_capped() {
        let config = SolverConfig {
            max_solutions: Some(1),
            ..SolverConfig::default()
        };
        let problem = CoverProblem::new(&two_bars(), row(), config).expect("problem builds");
        let report = problem.solve().expect("solve succeeds");
        assert_eq!(report.covers.len(), 1);
        assert!(report.is_capped());
    }

    // Tests a clue fixes which bar sits at the clue's end of the row
    // Verified by walking the ray backwards from its start
    #[test]
    fn test_clues_select_covers() {
        let from_left = SolverConfig {
            clues: vec![Clue::new("A", Cell::square([0, 0]), [1, 0])],
            ..SolverConfig::default()
        };
        let problem = CoverProblem::new(&two_bars(), row(), from_left).expect("problem builds");
        assert_eq!(problem.policy_names(), vec!["clue"]);
        let report = problem.solve().expect("solve succeeds");
        assert_eq!(report.covers.len(), 1);
        let a = report.covers.first().and_then(|cover| cover.get("A")).expect("A is placed");
        assert!(a.cells.contains(&Cell::square([0, 0])));

        let from_right = SolverConfig {
            clues: vec![Clue::new("A", Cell::square([5, 0]), [-1, 0])],
            ..SolverConfig::default()
        };
        let report = CoverProblem::new(&two_bars(), row(), from_right)
            .expect("problem builds")
            .solve()
            .expect("solve succeeds");
        assert_eq!(report.covers.len(), 1);
        let a = report.covers.first().and_then(|cover| cover.get("A")).expect("A is placed");
        assert!(a.cells.contains(&Cell::square([5, 0])));
    }

    // Tests policies are enabled independently and listed in evaluation order
    // Verified by installing the clue policy first
    #[test]
    fn test_policy_names() {
        let config = SolverConfig {
            forbid_filled_blocks: true,
            clues: vec![Clue::new("B", Cell::square([2, 0]), [1, 0])],
            ..SolverConfig::default()
        };
        let problem = CoverProblem::new(&two_bars(), row(), config).expect("problem builds");
        assert_eq!(problem.policy_names(), vec!["2x2 block", "clue"]);
        assert!(problem.config().forbid_filled_blocks);
        assert_eq!(problem.region().cell_count(), 6);
    }

    // Tests configuration errors surface before searching
    // Verified by building the matrix before checking lattices
    #[test]
    fn test_configuration_errors() {
        let hexiamonds = Catalogue::hexiamonds().expect("built-in hexiamonds are valid");
        let mismatch = CoverProblem::new(&hexiamonds, row(), SolverConfig::default());
        assert!(matches!(
            mismatch,
            Err(CoverError::InvalidParameter { parameter: "region", .. })
        ));

        let blocks_on_triangles = SolverConfig {
            forbid_filled_blocks: true,
            max_solutions: Some(1),
            mirror_handling: MirrorHandling::Distinct,
            ..SolverConfig::default()
        };
        let region = Region::hexagonish().expect("built-in board is valid");
        let result = CoverProblem::new(&hexiamonds, region, blocks_on_triangles);
        assert!(result.is_err_and(|error| error.is_configuration_error()));

        let bad_clue = SolverConfig {
            clues: vec![Clue::new("A", Cell::square([9, 9]), [1, 0])],
            ..SolverConfig::default()
        };
        assert!(matches!(
            CoverProblem::new(&two_bars(), row(), bad_clue),
            Err(CoverError::ClueOutsideRegion { .. })
        ));
    }
}
