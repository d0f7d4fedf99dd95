//! Players and board cells for two-player games.
//!
//! The engine works with the symbolic forms only. Numeric encodings (0/1/2)
//! exist solely for feature vectors handed to an external policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two players. `One` maximizes the value estimate, `Two` minimizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Numeric id used in encoded states (1 or 2).
    #[inline]
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parse a numeric id. Anything other than 1 or 2 is rejected.
    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Whether this player picks the child with the highest value.
    #[inline]
    pub fn is_maximizer(self) -> bool {
        self == Player::One
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.id())
    }
}

/// Ownership of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Owner(Player),
}

impl Cell {
    /// Numeric code: 0 = empty, 1 = player one, 2 = player two.
    #[inline]
    pub fn to_code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Owner(p) => p.id(),
        }
    }

    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            other => Player::from_id(other).map(Cell::Owner),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn is_owned_by(self, player: Player) -> bool {
        self == Cell::Owner(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::One.opponent().opponent(), Player::One);
    }

    #[test]
    fn test_player_ids() {
        assert_eq!(Player::One.id(), 1);
        assert_eq!(Player::Two.id(), 2);
        assert_eq!(Player::from_id(2), Some(Player::Two));
        assert_eq!(Player::from_id(0), None);
        assert_eq!(Player::from_id(3), None);
    }

    #[test]
    fn test_maximizer() {
        assert!(Player::One.is_maximizer());
        assert!(!Player::Two.is_maximizer());
    }

    #[test]
    fn test_cell_codes() {
        assert_eq!(Cell::Empty.to_code(), 0);
        assert_eq!(Cell::Owner(Player::One).to_code(), 1);
        assert_eq!(Cell::Owner(Player::Two).to_code(), 2);
        assert_eq!(Cell::from_code(1), Some(Cell::Owner(Player::One)));
        assert_eq!(Cell::from_code(7), None);
        assert!(Cell::default().is_empty());
        assert!(Cell::Owner(Player::Two).is_owned_by(Player::Two));
        assert!(!Cell::Owner(Player::Two).is_owned_by(Player::One));
    }
}
