//! Cell colors and move outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell color
///
/// Blue belongs to player 1 (stones and the left/right walls), Red to
/// player 2 (stones and the top/bottom walls). Gray marks the four
/// unplayable corners and White a free cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Red,
    Gray,
    White,
}

impl Color {
    /// Board symbol
    pub fn symbol(self) -> char {
        match self {
            Color::Blue => 'X',
            Color::Red => 'O',
            Color::Gray => '*',
            Color::White => '.',
        }
    }

    /// The other player color. Panics for Gray and White.
    pub fn opponent(self) -> Self {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
            other => panic!("{:?} is not a player color", other),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Result of one `HexBoard::play` call
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Cell already taken; nothing changed
    Occupied,
    /// Coordinates outside the playable area; nothing changed
    OutOfBounds,
    /// Stone placed, game continues
    NoWin,
    P1Win,
    P2Win,
}

impl Outcome {
    /// The move was rejected and must be retried
    pub fn is_error(self) -> bool {
        matches!(self, Outcome::Occupied | Outcome::OutOfBounds)
    }

    /// The move ended the game
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::P1Win | Outcome::P2Win)
    }

    /// Winning player number, if any
    pub fn winner(self) -> Option<u8> {
        match self {
            Outcome::P1Win => Some(1),
            Outcome::P2Win => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Outcome::Occupied => "Position already taken.",
            Outcome::OutOfBounds => "Position out of bounds.",
            Outcome::NoWin => "Successful play, no winner.",
            Outcome::P1Win => "Player1 wins!",
            Outcome::P2Win => "Player2 wins!",
        };
        f.write_str(msg)
    }
}
