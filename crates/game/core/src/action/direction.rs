use crate::state::Position;

/// One of the eight grid directions, clockwise from north.
///
/// The y axis grows downwards, so `North` is `(0, -1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn step(self, from: Position) -> Position {
        let (dx, dy) = self.delta();
        from.offset(dx, dy)
    }

    /// Direction leading from `from` to the adjacent cell `to`.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL.into_iter().find(|direction| direction.step(from) == to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn all_matches_declaration_order() {
        assert_eq!(Direction::iter().collect::<Vec<_>>(), Direction::ALL.to_vec());
    }

    #[test]
    fn between_inverts_step() {
        let origin = Position::new(5, 5);
        for direction in Direction::ALL {
            assert_eq!(Direction::between(origin, direction.step(origin)), Some(direction));
        }
        assert_eq!(Direction::between(origin, Position::new(7, 5)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }
}
