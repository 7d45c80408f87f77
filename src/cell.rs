use strum::VariantArray;

use crate::shape::Direction;

/// The count and arrangement of arms on a tile, before rotation.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug)]
pub enum LinkType {
    /// No arms.
    Empty,
    /// A single arm.
    DeadEnd,
    /// Two arms at a right angle.
    Corner,
    /// Two opposite arms.
    Straight,
    /// Three arms.
    TIntersection,
    /// Arms in all four directions.
    CrossIntersection,
}

impl LinkType {
    /// The arm pattern of this link at the reference orientation, [`Direction::Right`].
    pub(crate) fn base_arms(&self) -> Arms {
        Arms(match self {
            Self::Empty => [false, false, false, false],
            Self::DeadEnd => [true, false, false, false],
            Self::Corner => [true, true, false, false],
            Self::Straight => [true, false, true, false],
            Self::TIntersection => [true, true, true, false],
            Self::CrossIntersection => [true, true, true, true],
        })
    }

    /// The arm pattern of this link rotated to `orientation`.
    pub(crate) fn arms(&self, orientation: Direction) -> Arms {
        self.base_arms().rotated(orientation.index())
    }
}

/// Presence of an arm toward each direction, indexed by [`Direction::index`].
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Arms(pub(crate) [bool; 4]);

impl Arms {
    pub(crate) fn has(&self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    pub(crate) fn set(&mut self, direction: Direction, present: bool) {
        self.0[direction.index()] = present;
    }

    pub(crate) fn with(mut self, direction: Direction, present: bool) -> Self {
        self.set(direction, present);
        self
    }

    /// Rotate the pattern `n` quarter turns counter-clockwise: every arm moves
    /// to the slot `n` places after its own.
    pub(crate) fn rotated(&self, n: usize) -> Self {
        let mut rotated = [false; 4];
        for (index, &arm) in self.0.iter().enumerate() {
            rotated[(index + n) % 4] = arm;
        }
        Self(rotated)
    }

    /// The canonical `(LinkType, Direction)` pair drawing this pattern.
    ///
    /// Patterns with more than one rendition (a straight can be drawn at
    /// `Right` or `Left`) map to exactly one entry; the all-absent pattern maps
    /// to `(Empty, Right)`.
    pub(crate) fn decompose(&self) -> (LinkType, Direction) {
        match self.0 {
            [true, true, true, true] => (LinkType::CrossIntersection, Direction::Right),
            [true, true, true, false] => (LinkType::TIntersection, Direction::Right),
            [false, true, true, true] => (LinkType::TIntersection, Direction::Up),
            [true, false, true, true] => (LinkType::TIntersection, Direction::Left),
            [true, true, false, true] => (LinkType::TIntersection, Direction::Down),
            [true, true, false, false] => (LinkType::Corner, Direction::Right),
            [false, true, true, false] => (LinkType::Corner, Direction::Up),
            [false, false, true, true] => (LinkType::Corner, Direction::Left),
            [true, false, false, true] => (LinkType::Corner, Direction::Down),
            [true, false, true, false] => (LinkType::Straight, Direction::Right),
            [false, true, false, true] => (LinkType::Straight, Direction::Up),
            [true, false, false, false] => (LinkType::DeadEnd, Direction::Right),
            [false, true, false, false] => (LinkType::DeadEnd, Direction::Up),
            [false, false, true, false] => (LinkType::DeadEnd, Direction::Left),
            [false, false, false, true] => (LinkType::DeadEnd, Direction::Down),
            [false, false, false, false] => (LinkType::Empty, Direction::Right),
        }
    }

    /// The box-drawing character for this pattern.
    pub(crate) fn glyph(&self) -> char {
        match self.0 {
            [false, false, false, false] => ' ',
            [true, false, false, false] => '╶',
            [false, true, false, false] => '╵',
            [false, false, true, false] => '╴',
            [false, false, false, true] => '╷',
            [true, true, false, false] => '└',
            [false, true, true, false] => '┘',
            [false, false, true, true] => '┐',
            [true, false, false, true] => '┌',
            [true, false, true, false] => '─',
            [false, true, false, true] => '│',
            [true, true, true, false] => '┴',
            [false, true, true, true] => '┤',
            [true, false, true, true] => '┬',
            [true, true, false, true] => '├',
            [true, true, true, true] => '┼',
        }
    }
}

/// What a tile does with power.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum EntityType {
    /// Carries power between its neighbors.
    Link,
    /// The one tile power originates from.
    Source,
    /// Consumes power; dead ends default to this.
    Drain,
}

/// A square on the game board.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tile {
    /// The count and arrangement of arms.
    pub link: LinkType,
    /// The rotation applied to the arm pattern; [`Direction::Right`] leaves it unrotated.
    pub orientation: Direction,
    /// Whether the tile is a plain link, the source, or a drain.
    pub entity: EntityType,
}

impl Tile {
    /// Construct a tile. Dead ends become drains, everything else a plain link.
    pub fn new(link: LinkType, orientation: Direction) -> Self {
        Self {
            link,
            orientation,
            entity: match link {
                LinkType::DeadEnd => EntityType::Drain,
                _ => EntityType::Link,
            },
        }
    }

    /// The arm pattern of this tile at its current orientation.
    pub(crate) fn arms(&self) -> Arms {
        self.link.arms(self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::{Arms, EntityType, LinkType, Tile};
    use crate::shape::Direction;

    #[test]
    fn arm_patterns_round_trip() {
        for &link in LinkType::VARIANTS {
            for &orientation in Direction::VARIANTS {
                let (decomposed_link, decomposed_orientation) = link.arms(orientation).decompose();
                assert_eq!(link.arms(orientation), decomposed_link.arms(decomposed_orientation));
            }
        }
    }

    #[test]
    fn decompose_picks_canonical_orientations() {
        assert_eq!(Arms([true, true, false, false]).decompose(), (LinkType::Corner, Direction::Right));
        assert_eq!(Arms([false, true, true, false]).decompose(), (LinkType::Corner, Direction::Up));
        assert_eq!(Arms([true, true, false, true]).decompose(), (LinkType::TIntersection, Direction::Down));
        assert_eq!(Arms([false, true, false, true]).decompose(), (LinkType::Straight, Direction::Up));
        assert_eq!(Arms([false, false, false, false]).decompose(), (LinkType::Empty, Direction::Right));
    }

    #[test]
    fn rotation_moves_arms_counter_clockwise() {
        assert_eq!(LinkType::DeadEnd.arms(Direction::Up), Arms([false, true, false, false]));
        assert_eq!(LinkType::Corner.arms(Direction::Left), Arms([false, false, true, true]));
        assert_eq!(LinkType::TIntersection.arms(Direction::Down), Arms([true, true, false, true]));
        assert_eq!(LinkType::Straight.arms(Direction::Left), LinkType::Straight.arms(Direction::Right));
    }

    #[test]
    fn dead_ends_default_to_drains() {
        assert_eq!(Tile::new(LinkType::DeadEnd, Direction::Left).entity, EntityType::Drain);
        assert_eq!(Tile::new(LinkType::Corner, Direction::Left).entity, EntityType::Link);
        assert_eq!(Tile::new(LinkType::Empty, Direction::Right).entity, EntityType::Link);
    }
}
