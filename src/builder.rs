use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::NonZero;

use indexmap::IndexSet;
use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use rand::Rng;

use crate::board::{Puzzle, Wall, WallOrientation};
use crate::cell::{Arms, EntityType, LinkType, Tile};
use crate::grid::SquareGrid;
use crate::location::Location;
use crate::logic::{clamp, gaussian, weighted_choice};
use crate::shape::Direction;

// share of grid edges turned into walls, and the relative standard deviation
// of the wall count
const WALL_SHARE: f64 = 0.06;
const WALL_RSD: f64 = 0.4;
// likewise for the share of rotatable tiles the scrambling pass touches
const SCRAMBLE_SHARE: f64 = 0.8;
const SCRAMBLE_RSD: f64 = 0.1;

/// Tile-type frequency presets.
///
/// The preset weighs the tile types candidate moves would produce while the
/// board tree grows; harder presets favor corners and intersections over
/// straights.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Difficulty {
    /// Generous with straights and cross intersections.
    Easy,
    /// The balanced preset.
    #[default]
    Medium,
    /// No straights or cross intersections at all.
    Hard,
}

impl Difficulty {
    /// The selection weight of a move turning its parent tile into `link`.
    pub(crate) fn weight(&self, link: LinkType) -> usize {
        match self {
            Self::Easy => match link {
                LinkType::CrossIntersection => 1,
                LinkType::TIntersection => 1,
                LinkType::Corner => 4,
                LinkType::Straight => 3,
                LinkType::DeadEnd => 1,
                LinkType::Empty => 1,
            },
            Self::Medium => match link {
                LinkType::CrossIntersection => 0,
                LinkType::TIntersection => 1,
                LinkType::Corner => 5,
                LinkType::Straight => 2,
                LinkType::DeadEnd => 1,
                LinkType::Empty => 1,
            },
            Self::Hard => match link {
                LinkType::CrossIntersection => 0,
                LinkType::TIntersection => 2,
                LinkType::Corner => 5,
                LinkType::Straight => 0,
                LinkType::DeadEnd => 1,
                LinkType::Empty => 1,
            },
        }
    }
}

/// Game options consumed by [`Builder`].
#[derive(Copy, Clone, Debug)]
pub struct Options {
    /// Number of tiles along the width of the board.
    pub columns: usize,
    /// Number of tiles along the height of the board.
    pub rows: usize,
    /// Tile-type frequency preset.
    pub difficulty: Difficulty,
    /// Join opposite board edges, as if playing on a torus.
    pub wrap: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 10,
            difficulty: Difficulty::default(),
            wrap: false,
        }
    }
}

/// Reasons a [`Builder`] cannot be constructed from its [`Options`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A dimension in the options was zero.
    InvalidDimensions,
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions => write!(f, "board dimensions must both be at least 1"),
        }
    }
}

impl Error for BuildError {}

/// A generator of random [`Puzzle`]s.
///
/// The builder grows a random spanning tree over the whole grid, starting from
/// the source at the center and extending one weighted move at a time. Tree
/// arms become tiles, a few of the unused grid edges become walls, and a final
/// pass scrambles tile orientations to produce the puzzle handed to players.
#[derive(Copy, Clone, Debug)]
pub struct Builder {
    grid: SquareGrid,
    difficulty: Difficulty,
}

impl Builder {
    /// Construct a builder, validating the board dimensions in `options`.
    pub fn new(options: Options) -> Result<Self, BuildError> {
        let columns = NonZero::new(options.columns).ok_or(BuildError::InvalidDimensions)?;
        let rows = NonZero::new(options.rows).ok_or(BuildError::InvalidDimensions)?;

        Ok(Self {
            grid: SquareGrid::new(columns, rows, options.wrap),
            difficulty: options.difficulty,
        })
    }

    /// Generate a puzzle with the thread-local RNG.
    pub fn generate(options: Options) -> Result<Puzzle, BuildError> {
        Ok(Self::new(options)?.build(&mut rand::rng()))
    }

    /// Generate a puzzle, drawing all randomness from `rng`.
    ///
    /// The same options and RNG state always produce the same puzzle.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Puzzle {
        let source = Location(self.grid.columns().get() / 2, self.grid.rows().get() / 2);
        let (mut tiles, tree) = self.grow_tree(rng, source);
        let walls = self.place_walls(rng, &tree);
        let expected_moves = self.scramble(rng, &mut tiles);

        Puzzle {
            tiles,
            walls,
            source,
            expected_moves,
            wrap: self.grid.wrap(),
        }
    }

    /// Grow the spanning tree and freeze it into tiles.
    ///
    /// Each round collects every move from a frontier tile to an unvisited
    /// neighbor, weighs moves by the tile type the parent would become, and
    /// applies one. The frontier keeps insertion order so a seeded build is
    /// reproducible.
    fn grow_tree<R: Rng + ?Sized>(&self, rng: &mut R, source: Location) -> (Array2<Tile>, UnGraphMap<Location, ()>) {
        let shape = (self.grid.rows().get(), self.grid.columns().get());
        let mut arms: Array2<Arms> = Array2::from_elem(shape, Arms::default());
        let mut visited: Array2<bool> = Array2::from_elem(shape, false);
        let mut tree: UnGraphMap<Location, ()> = UnGraphMap::with_capacity(self.grid.node_count(), self.grid.node_count() - 1);

        tree.add_node(source);
        visited[source.as_index()] = true;
        let mut frontier = IndexSet::new();
        frontier.insert(source);

        loop {
            let mut next_frontier = IndexSet::new();
            let mut moves = Vec::new();
            for &parent in &frontier {
                for (direction, child) in self.grid.neighbors(parent) {
                    if !visited[child.as_index()] {
                        moves.push((parent, child, direction));
                        next_frontier.insert(parent);
                    }
                }
            }
            if moves.is_empty() {
                break;
            }

            let weights = moves.iter()
                .map(|&(parent, _, direction)| {
                    let speculative = arms[parent.as_index()].with(direction, true);
                    self.difficulty.weight(speculative.decompose().0)
                })
                .collect_vec();
            let &(parent, child, direction) = weighted_choice(rng, &moves, &weights);

            next_frontier.insert(child);
            visited[child.as_index()] = true;
            arms[parent.as_index()].set(direction, true);
            arms[child.as_index()].set(direction.opposite(), true);
            tree.add_edge(parent, child, ());
            frontier = next_frontier;
        }

        let mut tiles = Array2::from_shape_fn(shape, |index| {
            let (link, orientation) = arms[index].decompose();
            Tile::new(link, orientation)
        });
        tiles[source.as_index()].entity = EntityType::Source;

        (tiles, tree)
    }

    /// Place walls on a random selection of the grid edges the tree does not
    /// use. Border edges are only candidates on wrapped boards.
    fn place_walls<R: Rng + ?Sized>(&self, rng: &mut R, tree: &UnGraphMap<Location, ()>) -> HashSet<Wall> {
        let wrap = self.grid.wrap();
        let mut candidates = Vec::new();
        for position in self.grid.locations() {
            if (wrap || position.1 != 0) && !tree.contains_edge(position, self.grid.wrapped_step(position, Direction::Down)) {
                candidates.push(Wall { position, orientation: WallOrientation::Horizontal });
            }
            if (wrap || position.0 != 0) && !tree.contains_edge(position, self.grid.wrapped_step(position, Direction::Left)) {
                candidates.push(Wall { position, orientation: WallOrientation::Vertical });
            }
        }

        let mean = candidates.len() as f64 * WALL_SHARE;
        let count = clamp(gaussian(rng, mean, WALL_RSD * mean).round() as isize, 0, candidates.len() as isize) as usize;

        rand::seq::index::sample(rng, candidates.len(), count)
            .iter()
            .map(|index| candidates[index])
            .collect()
    }

    /// Rotate a random selection of the rotatable tiles and return how many
    /// were touched.
    ///
    /// Straight tiles rotate exactly one step, anything else one to three
    /// steps. Empty tiles and cross intersections look the same from every
    /// orientation and are left alone.
    fn scramble<R: Rng + ?Sized>(&self, rng: &mut R, tiles: &mut Array2<Tile>) -> usize {
        let rotatable = self.grid.locations()
            .filter(|location| !matches!(tiles[location.as_index()].link, LinkType::Empty | LinkType::CrossIntersection))
            .collect_vec();
        if rotatable.is_empty() {
            return 0;
        }

        let mean = rotatable.len() as f64 * SCRAMBLE_SHARE;
        let count = clamp(gaussian(rng, mean, SCRAMBLE_RSD * mean).round() as isize, 1, rotatable.len() as isize) as usize;

        for index in rand::seq::index::sample(rng, rotatable.len(), count) {
            let tile = &mut tiles[rotatable[index].as_index()];
            let turns = match tile.link {
                LinkType::Straight => 1,
                _ => rng.random_range(1..4),
            };
            tile.orientation = tile.orientation.rotated(turns);
        }

        count
    }

    /// A small handmade puzzle: a 3x3 board with the source in the middle,
    /// two walls and seven scrambled tiles.
    pub fn example() -> Puzzle {
        let mut tiles = Array2::from_elem((3, 3), Tile::new(LinkType::Empty, Direction::Right));
        tiles[Location(0, 2).as_index()] = Tile::new(LinkType::DeadEnd, Direction::Down);
        tiles[Location(1, 2).as_index()] = Tile::new(LinkType::TIntersection, Direction::Right);
        tiles[Location(2, 2).as_index()] = Tile::new(LinkType::Corner, Direction::Left);
        tiles[Location(0, 1).as_index()] = Tile::new(LinkType::DeadEnd, Direction::Down);
        tiles[Location(1, 1).as_index()] = Tile::new(LinkType::TIntersection, Direction::Down);
        tiles[Location(1, 1).as_index()].entity = EntityType::Source;
        tiles[Location(2, 1).as_index()] = Tile::new(LinkType::Straight, Direction::Right);
        tiles[Location(0, 0).as_index()] = Tile::new(LinkType::DeadEnd, Direction::Down);
        tiles[Location(1, 0).as_index()] = Tile::new(LinkType::Corner, Direction::Up);
        tiles[Location(2, 0).as_index()] = Tile::new(LinkType::DeadEnd, Direction::Right);

        let walls = HashSet::from([
            Wall { position: Location(0, 2), orientation: WallOrientation::Horizontal },
            Wall { position: Location(2, 1), orientation: WallOrientation::Vertical },
        ]);

        Puzzle {
            tiles,
            walls,
            source: Location(1, 1),
            expected_moves: 7,
            wrap: false,
        }
    }
}
