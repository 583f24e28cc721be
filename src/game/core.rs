//! Connect Four primitives commonly used within [`crate::game`].

use std::fmt;
use std::ops::Not;

use thiserror::Error;

/// Number of rows on the board.
pub const ROWS: usize = 6;
/// Number of columns on the board.
pub const COLUMNS: usize = 7;
/// Number of same-colored pieces in a line that wins the game.
pub const WIN_LENGTH: u8 = 4;
/// Once this many pieces are placed the board is full.
pub const MAX_PIECES: u8 = (ROWS * COLUMNS) as u8;

/// The game is played between two players: [`Player::One`] (having the
/// advantage of the first turn, rendered as `X`) and [`Player::Two`] (rendered
/// as `O`).
///
/// ```
/// use vier::game::core::Player;
///
/// assert_eq!(!Player::One, Player::Two);
/// assert_eq!(Player::Two.to_string(), "O");
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Character used in the textual board rendering.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::One => 'X',
            Self::Two => 'O',
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Given player completed a line of [`WIN_LENGTH`] pieces.
    Win(Player),
    /// All [`MAX_PIECES`] pieces were placed without a winning line.
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win(player) => write!(f, "The winner is {player}!"),
            Self::Draw => write!(f, "It was a draw!"),
        }
    }
}

/// Reasons for rejecting a move. The state is never modified when a move is
/// rejected.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidMove {
    /// Column index is not in `[0, COLUMNS)`.
    #[error("column {column} is out of range, expected 0..{}", COLUMNS)]
    ColumnOutOfRange {
        #[allow(missing_docs)]
        column: usize,
    },
    /// All [`ROWS`] cells of the column are occupied.
    #[error("column {column} is full")]
    ColumnFull {
        #[allow(missing_docs)]
        column: usize,
    },
    /// The game has already been won or drawn.
    #[error("the game is already over")]
    GameOver,
}
