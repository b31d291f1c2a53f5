//! Tests for lattice symmetry operations, normalization and path validation

#[cfg(test)]
mod tests {
    use polycover::spatial::lattice::{
        Lattice, bounds, check_closed_path, displacement, normalize, reflect_path, rotate_path,
        translate,
    };

    // Tests rotation order matches the lattice symmetry group
    // Verified by swapping the two rotation orders
    #[test]
    fn test_rotation_order() {
        assert_eq!(Lattice::Square.rotation_order(), 4);
        assert_eq!(Lattice::Triangular.rotation_order(), 6);
    }

    // Tests applying the elementary rotation N times is the identity
    // Verified by rotating triangular points with the square formula
    #[test]
    fn test_full_turn_is_identity() {
        for lattice in [Lattice::Square, Lattice::Triangular] {
            for point in [[1, 0], [2, 3], [-4, 1], [0, -5]] {
                let mut rotated = point;
                for _ in 0..lattice.rotation_order() {
                    rotated = lattice.rotate(rotated);
                }
                assert_eq!(rotated, point, "{lattice} rotation of {point:?}");
            }
        }
    }

    // Tests a triangular rotation maps each unit step to the next one
    // Verified by rotating clockwise instead of counter-clockwise
    #[test]
    fn test_triangular_rotation_steps() {
        let steps = Lattice::Triangular.unit_steps();
        for (index, &step) in steps.iter().enumerate() {
            let next = steps[(index + 1) % steps.len()];
            assert_eq!(Lattice::Triangular.rotate(step), next);
        }
    }

    // Tests reflection is an involution that swaps coordinates
    // Verified by negating instead of swapping
    #[test]
    fn test_reflect_is_involution() {
        for lattice in [Lattice::Square, Lattice::Triangular] {
            assert_eq!(lattice.reflect([2, 5]), [5, 2]);
            assert_eq!(lattice.reflect(lattice.reflect([-3, 7])), [-3, 7]);
        }
    }

    // Tests rotation preserves adjacency of lattice points
    // Verified by removing a direction from the triangular step table
    #[test]
    fn test_rotation_preserves_adjacency() {
        for lattice in [Lattice::Square, Lattice::Triangular] {
            for &step in lattice.unit_steps() {
                let from = [3, -2];
                let to = translate(from, step);
                assert!(lattice.is_adjacent(lattice.rotate(from), lattice.rotate(to)));
                assert!(lattice.is_adjacent(lattice.reflect(from), lattice.reflect(to)));
            }
        }
    }

    // Tests diagonal neighbours are adjacent only on the triangular lattice
    // Verified by sharing the step table between lattices
    #[test]
    fn test_adjacency_differs_by_lattice() {
        assert!(Lattice::Triangular.is_adjacent([0, 0], [1, 1]));
        assert!(!Lattice::Square.is_adjacent([0, 0], [1, 1]));
        assert!(!Lattice::Triangular.is_adjacent([0, 0], [1, -1]));
    }

    // Tests normalization moves the per-axis minimum to zero
    // Verified by subtracting the maximum instead of the minimum
    #[test]
    fn test_normalize() {
        let path = vec![[3, -2], [4, -2], [4, -1]];
        assert_eq!(normalize(&path), vec![[0, 0], [1, 0], [1, 1]]);
        assert!(normalize(&[]).is_empty());
    }

    // Tests normalization is translation invariant
    // Verified by returning the input path unchanged
    #[test]
    fn test_normalize_translation_invariant() {
        let path = vec![[0, 0], [1, 0], [1, 1], [0, 1]];
        let shifted: Vec<_> = path.iter().map(|&p| translate(p, [7, -3])).collect();
        assert_eq!(normalize(&path), normalize(&shifted));
    }

    // Tests the displacement between two points translates the first onto the second
    // Verified by subtracting in the opposite order
    #[test]
    fn test_displacement() {
        assert_eq!(displacement([2, 3], [-1, 5]), [-3, 2]);
        let from = [4, -7];
        let to = [-2, 9];
        assert_eq!(translate(from, displacement(from, to)), to);
        assert_eq!(displacement(to, to), [0, 0]);
    }

    // Tests path transforms apply point-wise
    // Verified by reversing the path order in rotate_path
    #[test]
    fn test_path_transforms() {
        let path = vec![[1, 0], [2, 1]];
        assert_eq!(rotate_path(Lattice::Square, &path), vec![[0, 1], [-1, 2]]);
        assert_eq!(rotate_path(Lattice::Triangular, &path), vec![[1, 1], [1, 2]]);
        assert_eq!(reflect_path(Lattice::Square, &path), vec![[0, 1], [1, 2]]);
    }

    // Tests bounding box of points
    // Verified by folding with max for both corners
    #[test]
    fn test_bounds() {
        let points = [[1, 5], [-2, 3], [4, -1]];
        assert_eq!(bounds(&points), Some(([-2, -1], [4, 5])));
        assert_eq!(bounds(&[]), None);
    }

    // Tests closed path validation accepts a unit square and a unit triangle
    // Verified by skipping the closing-step check
    #[test]
    fn test_check_closed_path_accepts_valid_paths() {
        assert!(check_closed_path(Lattice::Square, &[[0, 0], [1, 0], [1, 1], [0, 1]]).is_ok());
        assert!(check_closed_path(Lattice::Triangular, &[[0, 0], [1, 0], [1, 1]]).is_ok());
    }

    // Tests closed path validation rejects short, open and self-touching paths
    // Verified by removing the repeated point check
    #[test]
    fn test_check_closed_path_rejects_defects() {
        assert!(check_closed_path(Lattice::Square, &[[0, 0], [1, 0]]).is_err());
        // Gap between [2, 0] and [0, 1]
        assert!(check_closed_path(Lattice::Square, &[[0, 0], [1, 0], [2, 0], [0, 1]]).is_err());
        let repeated = [[0, 0], [1, 0], [1, 1], [0, 1], [0, 0], [-1, 0]];
        assert!(check_closed_path(Lattice::Square, &repeated).is_err());
        // The unit triangle is not a square-lattice path
        assert!(check_closed_path(Lattice::Square, &[[0, 0], [1, 0], [1, 1]]).is_err());
    }

    // Tests Cartesian mapping of triangular points
    // Verified by using the square mapping for both lattices
    #[test]
    fn test_to_cartesian() {
        assert_eq!(Lattice::Square.to_cartesian([2, 3]), [2.0, 3.0]);
        let [x, y] = Lattice::Triangular.to_cartesian([0, 1]);
        assert!((x + 0.5).abs() < 1e-12);
        assert!((y - 3.0_f64.sqrt() / 2.0).abs() < 1e-12);
    }
}
