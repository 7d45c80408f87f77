#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use ndarray::Array2;
    use petgraph::algo::connected_components;
    use petgraph::graphmap::UnGraphMap;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use strum::VariantArray;
    use unordered_pair::UnorderedPair;

    use crate::board::{Puzzle, WallOrientation};
    use crate::builder::{Builder, Difficulty, Options};
    use crate::cell::LinkType;
    use crate::location::Location;
    use crate::shape::Direction;
    use crate::solver::Solver;

    /// Check that `solution` is playable on `puzzle`: arms pair up across every
    /// edge, stay on the board, avoid walls, and power every tile.
    fn assert_powers_the_board(puzzle: &Puzzle, solution: &Array2<Direction>) {
        let grid = puzzle.grid();
        let arms = |location: Location| puzzle.tiles()[location.as_index()].link.arms(solution[location.as_index()]);

        let mut blocked = HashSet::new();
        for wall in puzzle.walls() {
            let inward = match wall.orientation {
                WallOrientation::Horizontal => Direction::Down,
                WallOrientation::Vertical => Direction::Left,
            };
            blocked.insert(UnorderedPair(wall.position, grid.wrapped_step(wall.position, inward)));
        }

        let mut graph: UnGraphMap<Location, ()> = UnGraphMap::new();
        for location in grid.locations() {
            graph.add_node(location);
            for &direction in Direction::VARIANTS {
                let arm = arms(location).has(direction);
                match grid.step(location, direction) {
                    None => assert!(!arm, "an arm at {location:?} points off the board"),
                    Some(neighbor) => {
                        assert_eq!(
                            arm,
                            arms(neighbor).has(direction.opposite()),
                            "mismatched arms between {location:?} and {neighbor:?}",
                        );
                        if arm {
                            assert!(
                                !blocked.contains(&UnorderedPair(location, neighbor)),
                                "an arm crosses the wall between {location:?} and {neighbor:?}",
                            );
                            graph.add_edge(location, neighbor, ());
                        }
                    }
                }
            }
        }

        assert_eq!(connected_components(&graph), 1, "the solution does not power the whole board");
    }

    #[test]
    fn example_puzzle_renders() {
        assert_eq!(Builder::example().to_string(), "╷┴┐
╷├─
╷┘╶
");
    }

    #[test]
    fn example_puzzle_has_a_unique_solution() {
        let puzzle = Builder::example();
        let solutions = Solver::new(&puzzle).run();

        let expected = Array2::from_shape_vec((3, 3), vec![
            Direction::Right, Direction::Up, Direction::Up,
            Direction::Right, Direction::Up, Direction::Up,
            Direction::Right, Direction::Left, Direction::Left,
        ]).unwrap();
        assert_eq!(solutions, vec![expected]);
        assert_powers_the_board(&puzzle, &solutions[0]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn generated_puzzles_solve(
            columns in 3usize..7,
            rows in 3usize..7,
            seed in any::<u64>(),
            wrap in any::<bool>(),
            difficulty in prop_oneof![Just(Difficulty::Easy), Just(Difficulty::Medium), Just(Difficulty::Hard)],
        ) {
            let options = Options { columns, rows, difficulty, wrap };
            let puzzle = Builder::new(options).unwrap().build(&mut ChaCha8Rng::seed_from_u64(seed));

            let solutions = Solver::new(&puzzle).run();
            prop_assert!(!solutions.is_empty(), "the generated puzzle has no solution");
            for solution in &solutions {
                assert_powers_the_board(&puzzle, solution);
            }
        }

        #[test]
        fn builder_is_deterministic(seed in any::<u64>()) {
            let options = Options { columns: 6, rows: 5, ..Options::default() };
            let builder = Builder::new(options).unwrap();
            let one = builder.build(&mut ChaCha8Rng::seed_from_u64(seed));
            let two = builder.build(&mut ChaCha8Rng::seed_from_u64(seed));

            prop_assert_eq!(one.to_string(), two.to_string());
            prop_assert_eq!(one.walls(), two.walls());
            prop_assert_eq!(one.expected_moves(), two.expected_moves());
        }

        #[test]
        fn solver_reports_solutions_deterministically(columns in 3usize..6, rows in 3usize..6, seed in any::<u64>()) {
            let options = Options { columns, rows, ..Options::default() };
            let puzzle = Builder::new(options).unwrap().build(&mut ChaCha8Rng::seed_from_u64(seed));

            prop_assert_eq!(Solver::new(&puzzle).run(), Solver::new(&puzzle).run());
        }

        #[test]
        fn walls_stay_off_the_border(seed in any::<u64>()) {
            let options = Options { columns: 7, rows: 6, ..Options::default() };
            let puzzle = Builder::new(options).unwrap().build(&mut ChaCha8Rng::seed_from_u64(seed));

            for wall in puzzle.walls() {
                match wall.orientation {
                    WallOrientation::Horizontal => prop_assert_ne!(wall.position.1, 0),
                    WallOrientation::Vertical => prop_assert_ne!(wall.position.0, 0),
                }
            }
        }

        #[test]
        fn scrambling_stays_within_the_rotatable_tiles(columns in 3usize..8, rows in 3usize..8, seed in any::<u64>()) {
            let options = Options { columns, rows, ..Options::default() };
            let puzzle = Builder::new(options).unwrap().build(&mut ChaCha8Rng::seed_from_u64(seed));

            let rotatable = puzzle.grid().locations()
                .filter(|location| {
                    !matches!(puzzle.tiles()[location.as_index()].link, LinkType::Empty | LinkType::CrossIntersection)
                })
                .count();
            prop_assert!(puzzle.expected_moves() >= 1);
            prop_assert!(puzzle.expected_moves() <= rotatable);
        }
    }
}
