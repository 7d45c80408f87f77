#![warn(missing_docs)]

//! # `netwalk`
//!
//! A generator and solver for Netwalk, the network-rotation puzzle also known as
//! [Net](https://www.chiark.greenend.org.uk/~sgtatham/puzzles/js/net.html): rotate the tiles of a scrambled grid
//! until every tile is connected to the power source.
//! Begin by generating a [`Puzzle`] from some [`Options`] through [`Builder::generate`], or [`Builder::build`] to bring your own RNG.
//! Hand the puzzle to a [`Solver`] and call [`run()`](Solver::run) to recover every orientation assignment that powers the whole board.
//!
//! # Internals
//! Generation grows a weighted random spanning tree outward from the source, so every tile is reachable by construction.
//! The chosen [`Difficulty`] weighs each candidate move by the tile type it would create, biasing the tree toward or away from straights and intersections.
//! A slice of the grid edges the tree leaves unused become walls, and a final pass scrambles tile orientations, counting its rotations as the expected move count.
//!
//! Solving is constraint propagation with backtracking rather than search over raw orientations.
//! Every tile starts with a domain of candidate orientations, deduplicated for rotational symmetry, and every pair of adjacent tiles shares an edge state: unknown, present or absent.
//! Settled edges prune domains and shrunken domains settle more edges, rippling outward until quiescence; when inference stalls, the solver branches on a tile with the smallest undecided domain and tries its candidates depth first.
//! Full assignments that leave the board in more than one connected component are rejected, so the reported solutions are exactly the ones that power every tile.

pub use board::{Puzzle, Wall, WallOrientation};
pub use builder::{BuildError, Builder, Difficulty, Options};
pub use cell::{EntityType, LinkType, Tile};
pub use location::Location;
pub use shape::Direction;
pub use solver::Solver;

pub(crate) mod board;
mod tests;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod shape;
pub(crate) mod grid;
pub(crate) mod cell;
pub(crate) mod builder;
pub(crate) mod solver;
