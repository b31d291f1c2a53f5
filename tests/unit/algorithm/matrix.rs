//! Tests for exact-cover matrix construction

#[cfg(test)]
mod tests {
    use polycover::CoverError;
    use polycover::algorithm::matrix::{ConstraintKey, CoverMode, ProblemMatrix};
    use polycover::algorithm::placement::{MirrorHandling, placements_by_piece};
    use polycover::spatial::cells::Cell;
    use polycover::spatial::lattice::{Lattice, Point};
    use polycover::spatial::region::Region;
    use polycover::spatial::shapes::Catalogue;

    const L_TROMINO: [Point; 8] = [
        [0, 0], [1, 0], [2, 0], [2, 1], [1, 1], [1, 2], [0, 2], [0, 1],
    ];

    const I_TROMINO: [Point; 8] = [
        [0, 0], [1, 0], [2, 0], [3, 0], [3, 1], [2, 1], [1, 1], [0, 1],
    ];

    fn two_l_trominoes() -> Catalogue {
        Catalogue::from_perimeters(
            Lattice::Square,
            &[("A", L_TROMINO.as_slice()), ("B", L_TROMINO.as_slice())],
        )
        .expect("L trominoes are valid")
    }

    fn build(catalogue: &Catalogue, region: &Region, mode: CoverMode) -> Result<ProblemMatrix, CoverError> {
        let pieces = placements_by_piece(region, catalogue, MirrorHandling::Free);
        ProblemMatrix::build(region, pieces, mode)
    }

    // Tests row and key counts for two L trominoes in a 2x3 rectangle
    // Verified by counting each orientation's placements twice
    #[test]
    fn test_l_trominoes_in_rectangle() {
        let region = Region::rectangle(2, 3).expect("2x3 rectangle is valid");
        let matrix = build(&two_l_trominoes(), &region, CoverMode::Exact).expect("matrix builds");

        assert_eq!(matrix.row_count(), 16);
        assert_eq!(matrix.key_count(), 8);
        assert_eq!(matrix.piece_key_count(), 2);
        assert_eq!(matrix.cell_key_count(), 6);
        assert_eq!(matrix.column(0).len(), 8);
        assert_eq!(matrix.column(1).len(), 8);
        assert_eq!(matrix.mode(), CoverMode::Exact);
    }

    // Tests piece keys come first in catalogue order, then cells in sorted order
    // Verified by interning cell keys before piece keys
    #[test]
    fn test_key_order() {
        let region = Region::rectangle(2, 3).expect("2x3 rectangle is valid");
        let matrix = build(&two_l_trominoes(), &region, CoverMode::Exact).expect("matrix builds");

        assert_eq!(matrix.piece_key("A"), Some(0));
        assert_eq!(matrix.piece_key("B"), Some(1));
        assert_eq!(matrix.cell_key(&Cell::square([0, 0])), Some(2));
        assert_eq!(matrix.cell_key(&Cell::square([0, 1])), Some(3));
        assert_eq!(matrix.cell_key(&Cell::square([1, 0])), Some(5));
        assert_eq!(matrix.key(0), Some(&ConstraintKey::Piece("A".to_string())));
        assert_eq!(matrix.key(7).and_then(ConstraintKey::cell), Some(&Cell::square([1, 2])));
        assert!(matrix.piece_key("C").is_none());
        assert!(matrix.cell_key(&Cell::square([2, 0])).is_none());
    }

    // Tests each row starts with its piece key and lists its cells, and columns match rows
    // Verified by pushing the piece key after the cell keys
    #[test]
    fn test_rows_and_columns_agree() {
        let region = Region::rectangle(2, 3).expect("2x3 rectangle is valid");
        let matrix = build(&two_l_trominoes(), &region, CoverMode::Exact).expect("matrix builds");

        for (id, row) in matrix.rows().iter().enumerate() {
            assert_eq!(row.keys.len(), 4);
            let piece = row.keys.first().copied().expect("row has a piece key");
            assert_eq!(matrix.key(piece).and_then(ConstraintKey::piece_name), Some(row.placement.piece.as_str()));
            for &key in &row.keys {
                assert!(matrix.column(key).contains(&id));
            }
        }
        // Rows of the first family come first
        assert!(matrix.column(0).iter().all(|&row| row < 8));
        assert!(matrix.column(0).windows(2).all(|pair| pair[0] < pair[1]));
    }

    // Tests exact mode makes every key primary and packing only the piece keys
    // Verified by marking cell keys primary in packing mode
    #[test]
    fn test_primary_keys_by_mode() {
        let region = Region::rectangle(2, 3).expect("2x3 rectangle is valid");
        let catalogue = two_l_trominoes();

        let exact = build(&catalogue, &region, CoverMode::Exact).expect("matrix builds");
        assert_eq!(exact.primary_keys().count(), 8);

        let packing = build(&catalogue, &region, CoverMode::Packing).expect("matrix builds");
        assert_eq!(packing.primary_keys().to_vec(), vec![0, 1]);
        assert!(!packing.is_primary(2));
        assert_eq!(packing.row_count(), exact.row_count());
    }

    // Tests a piece with no placement is reported by name
    // Verified by skipping families with empty placement lists
    #[test]
    fn test_unplaceable_piece() {
        let catalogue = Catalogue::from_perimeters(Lattice::Square, &[("I", I_TROMINO.as_slice())])
            .expect("I tromino is valid");
        let region = Region::rectangle(2, 2).expect("2x2 rectangle is valid");
        let result = build(&catalogue, &region, CoverMode::Packing);
        assert!(matches!(result, Err(CoverError::UnplaceablePiece { ref piece }) if piece == "I"));
    }

    // Tests an isolated cell is uncoverable in exact mode but allowed when packing
    // Verified by checking coverage in both modes
    #[test]
    fn test_uncoverable_cell() {
        let catalogue = Catalogue::from_perimeters(Lattice::Square, &[("I", I_TROMINO.as_slice())])
            .expect("I tromino is valid");
        let cells = [[0, 0], [1, 0], [2, 0], [5, 5]].map(Cell::square);
        let region = Region::from_cells(Lattice::Square, cells).expect("cell set is valid");

        let exact = build(&catalogue, &region, CoverMode::Exact);
        assert!(matches!(
            exact,
            Err(CoverError::UncoverableCell { cell }) if cell == Cell::square([5, 5])
        ));

        let packing = build(&catalogue, &region, CoverMode::Packing).expect("packing allows gaps");
        assert_eq!(packing.row_count(), 1);
        let stray = packing
            .cell_key(&Cell::square([5, 5]))
            .expect("stray cell still has a key");
        assert!(packing.column(stray).is_empty());
    }

    // Tests two families with one name are rejected
    // Verified by reusing the existing key when interning a family
    #[test]
    fn test_duplicate_family_name() {
        let catalogue = Catalogue::from_perimeters(Lattice::Square, &[("I", I_TROMINO.as_slice())])
            .expect("I tromino is valid");
        let region = Region::rectangle(6, 1).expect("6x1 rectangle is valid");
        let mut pieces = placements_by_piece(&region, &catalogue, MirrorHandling::Free);
        pieces.extend(pieces.clone());

        let result = ProblemMatrix::build(&region, pieces, CoverMode::Exact);
        assert!(matches!(result, Err(CoverError::InvalidShape { .. })));
    }

    // Tests key display names the key kind
    // Verified by printing piece keys without quotes
    #[test]
    fn test_key_display() {
        assert_eq!(ConstraintKey::Piece("sphinx".to_string()).to_string(), "piece 'sphinx'");
        assert_eq!(ConstraintKey::Cell(Cell::square([1, 2])).to_string(), "square (1, 2)");
        assert!(ConstraintKey::Piece(String::new()).is_piece());
        assert!(ConstraintKey::Cell(Cell::square([0, 0])).piece_name().is_none());
    }
}
