use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Array2;

use crate::cell::Tile;
use crate::grid::SquareGrid;
use crate::location::Location;

/// The two ways a wall can lie against its tile.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum WallOrientation {
    /// Blocks the edge between the tile and its neighbor below.
    Horizontal,
    /// Blocks the edge between the tile and its neighbor to the left.
    Vertical,
}

/// A wall between two adjacent tiles.
///
/// Walls are associated with the tile above or to the right of them:
/// `position` names that tile and `orientation` picks which of its two lower
/// edges is blocked.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Wall {
    /// The tile this wall is attached to.
    pub position: Location,
    /// Which edge of the tile the wall blocks.
    pub orientation: WallOrientation,
}

/// A game board: tiles, walls, the power source and the move count the
/// scrambling pass applied.
///
/// Puzzles are immutable. [`Builder`](crate::Builder) produces them and
/// [`Solver`](crate::Solver) consumes them by reference.
pub struct Puzzle {
    pub(crate) tiles: Array2<Tile>,
    pub(crate) walls: HashSet<Wall>,
    pub(crate) source: Location,
    pub(crate) expected_moves: usize,
    pub(crate) wrap: bool,
}

impl Puzzle {
    /// The tile grid, indexed `(y, x)`.
    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// The walls of the board.
    pub fn walls(&self) -> &HashSet<Wall> {
        &self.walls
    }

    /// Where the power source sits.
    pub fn source(&self) -> Location {
        self.source
    }

    /// How many tiles the scrambling pass rotated.
    pub fn expected_moves(&self) -> usize {
        self.expected_moves
    }

    /// Whether opposite board edges are joined, as if playing on a torus.
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// The number of tiles along the width of the board.
    pub fn columns(&self) -> usize {
        self.tiles.ncols()
    }

    /// The number of tiles along the height of the board.
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    pub(crate) fn grid(&self) -> SquareGrid {
        SquareGrid::new(
            NonZero::new(self.tiles.ncols()).unwrap(),
            NonZero::new(self.tiles.nrows()).unwrap(),
            self.wrap,
        )
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.tiles.nrows() * (self.tiles.ncols() + 1));

        for y in (0..self.tiles.nrows()).rev() {
            for x in 0..self.tiles.ncols() {
                out.push(self.tiles[(y, x)].arms().glyph());
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
