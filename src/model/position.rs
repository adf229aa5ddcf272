use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer grid coordinate. Range between positions is Chebyshev distance,
/// matching single-step diagonal movement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    pub fn get_range_to(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();

        dx.max(dy)
    }

    pub fn in_range_to(self, other: Position, range: u32) -> bool {
        self.get_range_to(other) <= range
    }

    /// The eight surrounding cells, unfiltered by grid bounds.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        const OFFSETS: [(i32, i32); 8] = [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

        OFFSETS.iter().map(move |(dx, dy)| Position::new(self.x + dx, self.y + dy))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub trait HasPosition {
    fn pos(&self) -> Position;
}

impl HasPosition for Position {
    fn pos(&self) -> Position {
        *self
    }
}

impl<T: HasPosition + ?Sized> HasPosition for &T {
    fn pos(&self) -> Position {
        (**self).pos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_chebyshev() {
        let a = Position::new(10, 10);

        assert_eq!(a.get_range_to(Position::new(13, 11)), 3);
        assert_eq!(a.get_range_to(Position::new(7, 16)), 6);
        assert_eq!(a.get_range_to(a), 0);
    }

    #[test]
    fn range_is_symmetric() {
        let a = Position::new(2, 40);
        let b = Position::new(33, 1);

        assert_eq!(a.get_range_to(b), b.get_range_to(a));
    }

    #[test]
    fn neighbors_are_all_at_range_one() {
        let center = Position::new(5, 5);
        let neighbors: Vec<_> = center.neighbors().collect();

        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.iter().all(|n| center.get_range_to(*n) == 1));
    }
}
