use std::collections::{HashMap, VecDeque};

use ndarray::Array2;
use petgraph::algo::connected_components;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::board::{Puzzle, WallOrientation};
use crate::cell::LinkType;
use crate::grid::SquareGrid;
use crate::location::Location;
use crate::shape::Direction;

/// What is known about the connection between two adjacent tiles.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum EdgeState {
    /// Nothing yet.
    Unknown,
    /// Both tiles have an arm toward each other.
    Present,
    /// At least one of the tiles has no arm toward the other.
    Absent,
}

/// Edge states keyed by unordered tile pairs, so a lookup from either endpoint
/// lands on the same entry.
///
/// The store covers every adjacency of the torus; on unwrapped boards the
/// edges crossing the border are forced to [`EdgeState::Absent`] up front
/// rather than left out.
#[derive(Clone)]
struct EdgeStateStore {
    states: HashMap<UnorderedPair<Location>, EdgeState>,
}

impl EdgeStateStore {
    fn new(grid: &SquareGrid) -> Self {
        let mut states = HashMap::new();
        for location in grid.locations() {
            states.insert(UnorderedPair(location, grid.wrapped_step(location, Direction::Right)), EdgeState::Unknown);
            states.insert(UnorderedPair(location, grid.wrapped_step(location, Direction::Up)), EdgeState::Unknown);
        }

        Self { states }
    }

    fn get(&self, a: Location, b: Location) -> EdgeState {
        self.states[&UnorderedPair(a, b)]
    }

    fn set(&mut self, a: Location, b: Location, state: EdgeState) {
        self.states.insert(UnorderedPair(a, b), state);
    }
}

/// A partial assignment: the candidate orientations left per tile, plus the
/// edge states those candidates have settled so far.
#[derive(Clone)]
struct State {
    domains: Array2<Vec<Direction>>,
    edges: EdgeStateStore,
}

/// A state on the backtracking stack together with the tiles whose domains may
/// still shrink under it.
struct WorkItem {
    state: State,
    work: VecDeque<Location>,
}

/// A backtracking constraint solver for [`Puzzle`]s.
///
/// Solving works on two kinds of state per partial assignment: a domain of
/// candidate orientations for every tile, and a store of settled edge states
/// between adjacent tiles. Forward inference drops candidates that disagree
/// with settled edges and settles every edge the remaining candidates agree
/// on, rippling outward until nothing changes. When inference stalls, the
/// solver picks a tile with the smallest undecided domain and tries each of
/// its candidates in turn, depth first.
///
/// Full assignments that leave part of the board unpowered are discarded, so
/// [`run`](Self::run) yields exactly the orientations that power every tile.
pub struct Solver {
    grid: SquareGrid,
    links: Array2<LinkType>,
    edges: EdgeStateStore,
    solutions: Vec<Array2<Direction>>,
}

impl Solver {
    /// Construct a solver for `puzzle`, settling up front every edge the
    /// board rules decide on their own: edges crossing the border of an
    /// unwrapped board, edges blocked by a wall, and edges between two
    /// dead ends.
    pub fn new(puzzle: &Puzzle) -> Self {
        let grid = puzzle.grid();
        let links = puzzle.tiles.map(|tile| tile.link);
        let mut edges = EdgeStateStore::new(&grid);

        if !grid.wrap() {
            for x in 0..grid.columns().get() {
                edges.set(Location(x, 0), Location(x, grid.rows().get() - 1), EdgeState::Absent);
            }
            for y in 0..grid.rows().get() {
                edges.set(Location(0, y), Location(grid.columns().get() - 1, y), EdgeState::Absent);
            }
        }

        for wall in &puzzle.walls {
            let inward = match wall.orientation {
                WallOrientation::Horizontal => Direction::Down,
                WallOrientation::Vertical => Direction::Left,
            };
            edges.set(wall.position, grid.wrapped_step(wall.position, inward), EdgeState::Absent);
        }

        // two dead ends may sit side by side, but joining them would strand
        // the pair from the rest of the board
        for location in grid.locations() {
            for direction in [Direction::Right, Direction::Up] {
                let neighbor = grid.wrapped_step(location, direction);
                if neighbor != location
                    && links[location.as_index()] == LinkType::DeadEnd
                    && links[neighbor.as_index()] == LinkType::DeadEnd
                {
                    edges.set(location, neighbor, EdgeState::Absent);
                }
            }
        }

        Self {
            grid,
            links,
            edges,
            solutions: Vec::new(),
        }
    }

    /// The orientations a tile of type `link` can meaningfully take.
    ///
    /// Tiles that look the same from several orientations only get one
    /// candidate per distinct arm pattern.
    fn initial_domain(link: LinkType) -> Vec<Direction> {
        match link {
            LinkType::Empty | LinkType::CrossIntersection => vec![Direction::Right],
            LinkType::Straight => vec![Direction::Right, Direction::Up],
            _ => Direction::VARIANTS.to_vec(),
        }
    }

    /// Find every orientation assignment that powers the whole board.
    ///
    /// Returns one grid of orientations per solution, indexed like
    /// [`Puzzle::tiles`]. Solving uses no randomness: branching always picks
    /// the first tile with the smallest undecided domain in the canonical
    /// `(x, y)` scan order and explores its candidates last first, so the
    /// same puzzle yields the same solutions in the same order on every run.
    pub fn run(mut self) -> Vec<Array2<Direction>> {
        let mut initial = State {
            domains: self.links.map(|&link| Self::initial_domain(link)),
            edges: self.edges.clone(),
        };
        for location in self.grid.locations() {
            if initial.domains[location.as_index()].len() == 1 {
                self.inspect(location, &mut initial);
            }
        }

        let mut stack = vec![WorkItem {
            state: initial,
            work: self.grid.locations().collect(),
        }];

        while let Some(WorkItem { mut state, mut work }) = stack.pop() {
            if !self.forward_inference(&mut state, &mut work) {
                continue;
            }

            let mut branch = None;
            let mut smallest = usize::MAX;
            for location in self.grid.locations() {
                let size = state.domains[location.as_index()].len();
                if size > 1 && size < smallest {
                    branch = Some(location);
                    smallest = size;
                }
            }
            // forward inference only asks for branching when some domain
            // still has at least two candidates
            let branch = branch.unwrap();

            for &orientation in &state.domains[branch.as_index()] {
                let mut child = state.clone();
                child.domains[branch.as_index()] = vec![orientation];
                self.inspect(branch, &mut child);
                stack.push(WorkItem {
                    state: child,
                    work: self.grid.wrapped_neighbors(branch).into(),
                });
            }
        }

        self.solutions
    }

    /// Run `state` to quiescence, inspecting tiles off the work queue and
    /// queueing the neighbors of every tile whose domain shrank.
    ///
    /// Returns `true` if the state needs branching to make further progress.
    /// An emptied domain abandons the state; a fully assigned one is recorded
    /// as a solution if it powers the board.
    fn forward_inference(&mut self, state: &mut State, work: &mut VecDeque<Location>) -> bool {
        while let Some(position) = work.pop_front() {
            let before = state.domains[position.as_index()].len();
            if before <= 1 {
                // a settled tile already has all of its edges written
                continue;
            }

            self.inspect(position, state);

            let after = state.domains[position.as_index()].len();
            if after == 0 {
                return false;
            }
            if after == before {
                continue;
            }
            for neighbor in self.grid.wrapped_neighbors(position) {
                if !work.contains(&neighbor) {
                    work.push_back(neighbor);
                }
            }
        }

        if state.domains.iter().any(|domain| domain.len() > 1) {
            return true;
        }

        if self.check_power(state) {
            self.solutions.push(state.domains.map(|domain| domain[0]));
        }

        false
    }

    /// Re-derive what is known about one tile: drop the candidates that
    /// disagree with a settled edge, then settle every edge the remaining
    /// candidates agree on.
    fn inspect(&self, position: Location, state: &mut State) {
        let State { domains, edges } = state;
        let link = self.links[position.as_index()];

        let domain = &mut domains[position.as_index()];
        domain.retain(|&orientation| self.orientation_fits(position, link, orientation, edges));

        let Some((&first, rest)) = domain.split_first() else {
            return;
        };

        for &direction in Direction::VARIANTS {
            let arm = link.arms(first).has(direction);
            if rest.iter().any(|&orientation| link.arms(orientation).has(direction) != arm) {
                continue;
            }

            let neighbor = self.grid.wrapped_step(position, direction);
            if neighbor == self.grid.wrapped_step(position, direction.opposite()) {
                // boards thinner than three tiles fold a tile's two
                // neighbors along an axis onto a single edge, which cannot
                // hold information about both directions at once
                continue;
            }

            let inferred = if arm { EdgeState::Present } else { EdgeState::Absent };
            let known = edges.get(position, neighbor);
            assert!(
                known == EdgeState::Unknown || known == inferred,
                "edge inference contradicts a settled edge",
            );
            edges.set(position, neighbor, inferred);
        }
    }

    /// Whether a tile of type `link` at `position` can take `orientation`
    /// without disagreeing with a settled edge.
    fn orientation_fits(&self, position: Location, link: LinkType, orientation: Direction, edges: &EdgeStateStore) -> bool {
        let arms = link.arms(orientation);
        Direction::VARIANTS.iter().all(|&direction| {
            let neighbor = self.grid.wrapped_step(position, direction);
            if neighbor == position {
                return true;
            }
            match edges.get(position, neighbor) {
                EdgeState::Unknown => true,
                EdgeState::Present => arms.has(direction),
                EdgeState::Absent => !arms.has(direction),
            }
        })
    }

    /// Whether the fully assigned `state` powers every tile, i.e. the present
    /// edges connect the whole board into one component.
    fn check_power(&self, state: &State) -> bool {
        let mut graph: UnGraphMap<Location, ()> = UnGraphMap::with_capacity(self.grid.node_count(), self.grid.node_count());

        for location in self.grid.locations() {
            graph.add_node(location);
        }
        for location in self.grid.locations() {
            for direction in [Direction::Right, Direction::Up] {
                let neighbor = self.grid.wrapped_step(location, direction);
                if neighbor != location && state.edges.get(location, neighbor) == EdgeState::Present {
                    graph.add_edge(location, neighbor, ());
                }
            }
        }

        connected_components(&graph) == 1
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::{EdgeState, EdgeStateStore, Solver};
    use crate::cell::LinkType;
    use crate::grid::SquareGrid;
    use crate::location::Location;
    use crate::shape::Direction;

    fn grid(columns: usize, rows: usize, wrap: bool) -> SquareGrid {
        SquareGrid::new(NonZero::new(columns).unwrap(), NonZero::new(rows).unwrap(), wrap)
    }

    #[test]
    fn edge_store_is_symmetric() {
        let mut store = EdgeStateStore::new(&grid(3, 3, false));
        store.set(Location(1, 1), Location(2, 1), EdgeState::Present);

        assert_eq!(store.get(Location(2, 1), Location(1, 1)), EdgeState::Present);
        assert_eq!(store.get(Location(1, 0), Location(1, 1)), EdgeState::Unknown);
    }

    #[test]
    fn symmetric_links_get_reduced_domains() {
        assert_eq!(Solver::initial_domain(LinkType::Empty), vec![Direction::Right]);
        assert_eq!(Solver::initial_domain(LinkType::CrossIntersection), vec![Direction::Right]);
        assert_eq!(Solver::initial_domain(LinkType::Straight), vec![Direction::Right, Direction::Up]);
        assert_eq!(Solver::initial_domain(LinkType::Corner).len(), 4);
    }
}
