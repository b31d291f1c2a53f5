//! Tests for translating row-index solutions into covers

#[cfg(test)]
mod tests {
    use polycover::CoverError;
    use polycover::algorithm::matrix::{CoverMode, ProblemMatrix};
    use polycover::algorithm::placement::{MirrorHandling, placements_by_piece};
    use polycover::algorithm::search::{SilentMonitor, search};
    use polycover::algorithm::translation::{Cover, CoveredPiece, translate_covers};
    use polycover::spatial::cells::Cell;
    use polycover::spatial::lattice::{Lattice, Point};
    use polycover::spatial::region::Region;
    use polycover::spatial::shapes::Catalogue;
    use std::collections::BTreeSet;

    const L_TROMINO: [Point; 8] = [
        [0, 0], [1, 0], [2, 0], [2, 1], [1, 1], [1, 2], [0, 2], [0, 1],
    ];

    fn l_problem() -> (Region, ProblemMatrix) {
        let region = Region::rectangle(2, 3).expect("2x3 rectangle is valid");
        let catalogue = Catalogue::from_perimeters(
            Lattice::Square,
            &[("A", L_TROMINO.as_slice()), ("B", L_TROMINO.as_slice())],
        )
        .expect("L trominoes are valid");
        let pieces = placements_by_piece(&region, &catalogue, MirrorHandling::Free);
        let matrix = ProblemMatrix::build(&region, pieces, CoverMode::Exact).expect("matrix builds");
        (region, matrix)
    }

    // Tests each translated cover maps both pieces to disjoint cells filling the region
    // Verified by attaching every row's cells to the first piece key
    #[test]
    fn test_translate_search_results() {
        let (region, matrix) = l_problem();
        let outcome = search(&matrix, &[], None, &mut SilentMonitor).expect("search succeeds");
        let covers = translate_covers(&outcome.solutions, &matrix).expect("solutions translate");

        assert_eq!(covers.len(), 4);
        for cover in &covers {
            assert_eq!(cover.len(), 2);
            let a = cover.get("A").expect("A is placed");
            let b = cover.get("B").expect("B is placed");
            assert_eq!(a.cells.len(), 3);
            assert!(a.cells.is_disjoint(&b.cells));
            assert_eq!(cover.cells(), *region.cells());
            assert_eq!(a.perimeter.len(), 8);
        }

        let distinct: BTreeSet<Vec<BTreeSet<Cell>>> = covers
            .iter()
            .map(|cover| cover.pieces().values().map(|piece| piece.cells.clone()).collect())
            .collect();
        assert_eq!(distinct.len(), 4);
    }

    // Tests a piece appearing twice in one solution is an invariant violation
    // Verified by letting a later row overwrite the earlier entry
    #[test]
    fn test_piece_placed_twice() {
        let (_, matrix) = l_problem();
        let result = translate_covers(&[vec![0, 1]], &matrix);
        assert!(matches!(result, Err(CoverError::InvariantViolation { .. })));
    }

    // Tests a missing row is an invariant violation
    // Verified by skipping rows that do not exist
    #[test]
    fn test_missing_row() {
        let (_, matrix) = l_problem();
        let result = translate_covers(&[vec![1000]], &matrix);
        assert!(matches!(result, Err(CoverError::InvariantViolation { .. })));
        assert!(translate_covers(&[], &matrix).expect("nothing to translate").is_empty());
    }

    // Tests cover lookups by cell
    // Verified by returning the first piece for any cell
    #[test]
    fn test_cover_owner() {
        let mut cover = Cover::default();
        assert!(cover.is_empty());
        let piece = CoveredPiece {
            cells: BTreeSet::from([Cell::square([0, 0]), Cell::square([1, 0])]),
            perimeter: Vec::new(),
            mirrored: true,
        };
        assert!(cover.insert("D", piece.clone()).is_none());
        let replaced = cover.insert("D", piece);
        assert_eq!(replaced.as_ref(), cover.get("D"));

        assert_eq!(cover.owner(&Cell::square([1, 0])), Some("D"));
        assert_eq!(cover.owner(&Cell::square([2, 0])), None);
        assert_eq!(cover.len(), 1);
    }
}
