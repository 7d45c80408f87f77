use itertools::Itertools;
use strum::VariantArray;

use crate::location::{Dimension, Location};
use crate::shape::Direction;

/// The rectangular board topology: bounds checking, stepping with or without
/// wrapping, and the canonical scan order every deterministic pass uses.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SquareGrid {
    columns: Dimension,
    rows: Dimension,
    wrap: bool,
}

impl SquareGrid {
    pub(crate) fn new(columns: Dimension, rows: Dimension, wrap: bool) -> Self {
        Self { columns, rows, wrap }
    }

    pub(crate) fn columns(&self) -> Dimension {
        self.columns
    }

    pub(crate) fn rows(&self) -> Dimension {
        self.rows
    }

    pub(crate) fn wrap(&self) -> bool {
        self.wrap
    }

    pub(crate) fn node_count(&self) -> usize {
        self.columns.get() * self.rows.get()
    }

    pub(crate) fn valid(&self, location: Location) -> bool {
        location.0 < self.columns.get() && location.1 < self.rows.get()
    }

    /// Step off `location`, respecting the wrap flag: on a wrapped board the
    /// result is reduced modulo the dimensions, otherwise stepping off the
    /// board yields [`None`].
    pub(crate) fn step(&self, location: Location, direction: Direction) -> Option<Location> {
        if self.wrap {
            Some(self.wrapped_step(location, direction))
        } else {
            let stepped = location.offset_by(direction.vector());
            self.valid(stepped).then_some(stepped)
        }
    }

    /// Step off `location` on the torus, regardless of the wrap flag.
    pub(crate) fn wrapped_step(&self, location: Location, direction: Direction) -> Location {
        let (dx, dy) = direction.vector();
        Location(
            (location.0 as isize + dx).rem_euclid(self.columns.get() as isize) as usize,
            (location.1 as isize + dy).rem_euclid(self.rows.get() as isize) as usize,
        )
    }

    /// The up-to-four reachable neighbors of `location`, in [`Direction`] order.
    pub(crate) fn neighbors(&self, location: Location) -> Vec<(Direction, Location)> {
        Direction::VARIANTS.iter()
            .filter_map(|&direction| self.step(location, direction).map(|stepped| (direction, stepped)))
            .collect_vec()
    }

    /// All four torus neighbors of `location`, in [`Direction`] order.
    ///
    /// On boards narrower than three cells the same location may appear twice.
    pub(crate) fn wrapped_neighbors(&self, location: Location) -> Vec<Location> {
        Direction::VARIANTS.iter()
            .map(|&direction| self.wrapped_step(location, direction))
            .collect_vec()
    }

    /// Every location of the grid in x-major order: `(0, 0), (0, 1), ..., (1, 0), ...`
    pub(crate) fn locations(&self) -> impl Iterator<Item = Location> {
        (0..self.columns.get()).cartesian_product(0..self.rows.get()).map(|(x, y)| Location(x, y))
    }
}
