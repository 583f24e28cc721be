//! Provides fully-specified [Connect Four] game state representation: the
//! board grid, per-column fill levels, the side to move and the result of the
//! game once it is over.
//!
//! [Connect Four]: https://en.wikipedia.org/wiki/Connect_Four

use std::fmt;

use anyhow::{bail, Context};
use arrayvec::ArrayVec;
use itertools::Itertools;

use crate::game::core::{InvalidMove, Outcome, Player, COLUMNS, MAX_PIECES, ROWS, WIN_LENGTH};

/// Columns that can still receive a piece. There are at most [`COLUMNS`] of
/// them, so the list never allocates.
pub type MoveList = ArrayVec<usize, COLUMNS>;

/// Steps `(row, column)` along the four lines passing through a cell:
/// horizontal, vertical, main diagonal and anti-diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Cells further than this from the placed piece can not be a part of a
/// winning line that goes through it.
const REACH: isize = WIN_LENGTH as isize - 1;

/// State of the game, the only thing that [`GameState::apply_move`] mutates.
///
/// Rows are counted from the bottom: row 0 is where the first piece dropped
/// into an empty column lands.
///
/// The state is cheap to copy (less than a hundred bytes) and the search
/// relies on that: every iteration explores a private clone and never touches
/// the caller's state.
#[derive(Clone, PartialEq, Eq)]
pub struct GameState {
    board: [[Option<Player>; COLUMNS]; ROWS],
    /// Next free row for each column. Reaches [`ROWS`] once the column is full.
    levels: [u8; COLUMNS],
    side_to_move: Player,
    winner: Option<Player>,
    pieces: u8,
}

impl GameState {
    /// Creates an empty board with [`Player::One`] to move.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            board: [[None; COLUMNS]; ROWS],
            levels: [0; COLUMNS],
            side_to_move: Player::One,
            winner: None,
            pieces: 0,
        }
    }

    /// Parses a sequence of 1-indexed column digits (e.g. `"4453"`) and plays
    /// them one by one from the empty board.
    ///
    /// ```
    /// use vier::game::core::Player;
    /// use vier::game::state::GameState;
    ///
    /// let state = GameState::from_moves("4444").expect("legal moves");
    /// assert_eq!(state.level(3), 4);
    /// assert_eq!(state.side_to_move(), Player::One);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if a character is not a column digit or the move is
    /// illegal in the position it is applied to.
    pub fn from_moves(input: &str) -> anyhow::Result<Self> {
        let mut state = Self::new();
        for (ply, symbol) in input.trim().chars().enumerate() {
            let column = match symbol.to_digit(10) {
                Some(digit @ 1..=7) => digit as usize - 1,
                _ => bail!("expected column digit in 1..={COLUMNS}, got '{symbol}' at ply {ply}"),
            };
            let _ = state
                .apply_move(column)
                .with_context(|| format!("illegal move {symbol} at ply {ply} in {input}"))?;
        }
        Ok(state)
    }

    /// Player whose piece will be placed by the next move.
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Player who completed a line, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Number of pieces on the board, in `[0, MAX_PIECES]`.
    #[must_use]
    pub const fn pieces(&self) -> u8 {
        self.pieces
    }

    /// Next free row in `column`. Equals [`ROWS`] once the column is full.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    #[must_use]
    pub const fn level(&self, column: usize) -> usize {
        self.levels[column] as usize
    }

    /// Whether `column` has received [`ROWS`] pieces.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    #[must_use]
    pub const fn is_full(&self, column: usize) -> bool {
        self.level(column) >= ROWS
    }

    /// Contents of the cell, where row 0 is the bottom of the board.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` are out of range.
    #[must_use]
    pub const fn cell(&self, row: usize, column: usize) -> Option<Player> {
        self.board[row][column]
    }

    /// The game is over after a win or once the board is full.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.winner.is_some() || self.pieces >= MAX_PIECES
    }

    /// Returns the result of the game or `None` while it is still in
    /// progress.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        match self.winner {
            Some(player) => Some(Outcome::Win(player)),
            None if self.pieces >= MAX_PIECES => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Columns that are not full, in ascending order. Empty once the game is
    /// over.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        if self.is_over() {
            return MoveList::new();
        }
        (0..COLUMNS).filter(|&column| !self.is_full(column)).collect()
    }

    /// Drops a piece of the side to move into `column` and passes the turn.
    /// Returns `true` if this move ended the game.
    ///
    /// # Errors
    ///
    /// The move is rejected without modifying the state if `column` is out of
    /// range, the game is already over or the column is full.
    pub fn apply_move(&mut self, column: usize) -> Result<bool, InvalidMove> {
        if column >= COLUMNS {
            return Err(InvalidMove::ColumnOutOfRange { column });
        }
        if self.is_over() {
            return Err(InvalidMove::GameOver);
        }
        if self.is_full(column) {
            return Err(InvalidMove::ColumnFull { column });
        }
        Ok(self.make_move(column))
    }

    /// Same as [`GameState::apply_move`] for moves that are known to be legal.
    pub(crate) fn make_move(&mut self, column: usize) -> bool {
        debug_assert!(column < COLUMNS && !self.is_over() && !self.is_full(column));

        let row = self.level(column);
        self.board[row][column] = Some(self.side_to_move);
        self.pieces += 1;
        // Only lines through the new piece could have changed.
        if self.completes_line(row, column) {
            self.winner = Some(self.side_to_move);
        }
        self.levels[column] += 1;
        self.side_to_move = !self.side_to_move;
        self.is_over()
    }

    /// Walks a window of `[-REACH, REACH]` cells along each line through
    /// `(row, column)` keeping a streak of the mover's pieces per line.
    fn completes_line(&self, row: usize, column: usize) -> bool {
        let mover = self.side_to_move;
        let mut streaks = [0; DIRECTIONS.len()];
        for offset in -REACH..=REACH {
            for (streak, (row_step, column_step)) in streaks.iter_mut().zip(DIRECTIONS) {
                let Some((r, c)) = shift(row, column, row_step * offset, column_step * offset)
                else {
                    continue;
                };
                if self.board[r][c] == Some(mover) {
                    *streak += 1;
                    if *streak >= WIN_LENGTH {
                        return true;
                    }
                } else {
                    *streak = 0;
                }
            }
        }
        false
    }
}

/// Moves `(row, column)` by the given deltas, returning `None` if the result
/// is off the board.
fn shift(row: usize, column: usize, rows: isize, columns: isize) -> Option<(usize, usize)> {
    let row = row.checked_add_signed(rows).filter(|&row| row < ROWS)?;
    let column = column
        .checked_add_signed(columns)
        .filter(|&column| column < COLUMNS)?;
    Some((row, column))
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&str> for GameState {
    type Error = anyhow::Error;

    /// Constructs the state from a sequence of 1-indexed column digits. See
    /// [`GameState::from_moves`].
    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_moves(input)
    }
}

impl fmt::Display for GameState {
    /// Prints the board top row first: `X` and `O` for the pieces of
    /// [`Player::One`] and [`Player::Two`], `-` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.board.iter().rev() {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('-', Player::symbol))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")?;
        writeln!(f, "Player to move: {}", self.side_to_move)?;
        writeln!(f, "Pieces: {}", self.pieces)?;
        writeln!(f, "Legal moves: [{}]", self.legal_moves().iter().join(", "))?;
        match self.outcome() {
            Some(outcome) => writeln!(f, "Outcome: {outcome}"),
            None => writeln!(f, "Outcome: in progress"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup(moves: &str) -> GameState {
        let state = GameState::from_moves(moves);
        assert!(state.is_ok(), "input: {moves}");
        state.unwrap()
    }

    #[test]
    fn empty_board() {
        let state = GameState::new();
        assert_eq!(state.side_to_move(), Player::One);
        assert_eq!(state.pieces(), 0);
        assert_eq!(state.winner(), None);
        assert_eq!(state.outcome(), None);
        assert!(!state.is_over());
        assert_eq!(state.legal_moves().as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn pieces_stack_from_the_bottom() {
        let mut state = GameState::new();
        assert_eq!(state.apply_move(2), Ok(false));
        assert_eq!(state.apply_move(2), Ok(false));
        assert_eq!(state.cell(0, 2), Some(Player::One));
        assert_eq!(state.cell(1, 2), Some(Player::Two));
        assert_eq!(state.cell(2, 2), None);
        assert_eq!(state.level(2), 2);
        assert_eq!(state.pieces(), 2);
        assert_eq!(state.side_to_move(), Player::One);
    }

    #[test]
    fn render() {
        let state = setup("4453");
        assert_eq!(
            state.to_string(),
            "-------\n\
             -------\n\
             -------\n\
             -------\n\
             ---O---\n\
             --OXX--\n"
        );
        assert_eq!(
            format!("{state:?}"),
            "-------\n\
             -------\n\
             -------\n\
             -------\n\
             ---O---\n\
             --OXX--\n\
             Player to move: X\n\
             Pieces: 4\n\
             Legal moves: [0, 1, 2, 3, 4, 5, 6]\n\
             Outcome: in progress\n"
        );
    }

    #[test]
    fn out_of_range() {
        let mut state = setup("12");
        let before = state.clone();
        assert_eq!(
            state.apply_move(COLUMNS),
            Err(InvalidMove::ColumnOutOfRange { column: COLUMNS })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn full_column_is_rejected() {
        let mut state = setup("111111");
        assert!(state.is_full(0));
        assert_eq!(state.level(0), ROWS);
        assert!(!state.legal_moves().contains(&0));
        let before = state.clone();
        assert_eq!(
            state.apply_move(0),
            Err(InvalidMove::ColumnFull { column: 0 })
        );
        assert_eq!(state, before);
        assert_eq!(state.side_to_move(), Player::One);
        assert_eq!(state.pieces(), 6);
    }

    #[test]
    fn no_moves_after_win() {
        // X wins vertically in column 1.
        let mut state = setup("1212121");
        assert_eq!(state.winner(), Some(Player::One));
        assert!(state.legal_moves().is_empty());
        let before = state.clone();
        assert_eq!(state.apply_move(3), Err(InvalidMove::GameOver));
        assert_eq!(state, before);
    }

    #[test]
    fn horizontal_window_at_the_edge() {
        // X: a1 b1 c1 d1 with O stacking on top of them.
        let mut state = setup("112233");
        assert_eq!(state.winner(), None);
        assert_eq!(state.apply_move(3), Ok(true));
        assert_eq!(state.winner(), Some(Player::One));
        assert_eq!(state.outcome(), Some(Outcome::Win(Player::One)));
    }

    #[test]
    fn completing_piece_in_the_middle_of_a_line() {
        // X holds a1 b1 d1, the last piece fills the gap at c1.
        let mut state = setup("11224");
        assert_eq!(state.winner(), None);
        assert_eq!(state.side_to_move(), Player::Two);
        let _ = state.apply_move(3).unwrap();
        assert_eq!(state.apply_move(2), Ok(true));
        assert_eq!(state.winner(), Some(Player::One));
    }

    #[test]
    fn diagonal() {
        // X: a1 b2 c3 d4.
        let state = setup("12234334544");
        assert_eq!(state.cell(0, 0), Some(Player::One));
        assert_eq!(state.cell(1, 1), Some(Player::One));
        assert_eq!(state.cell(2, 2), Some(Player::One));
        assert_eq!(state.cell(3, 3), Some(Player::One));
        assert_eq!(state.winner(), Some(Player::One));
    }

    #[test]
    fn anti_diagonal() {
        // X: g1 f2 e3 d4.
        let state = setup("76654554344");
        assert_eq!(state.cell(0, 6), Some(Player::One));
        assert_eq!(state.cell(1, 5), Some(Player::One));
        assert_eq!(state.cell(2, 4), Some(Player::One));
        assert_eq!(state.cell(3, 3), Some(Player::One));
        assert_eq!(state.winner(), Some(Player::One));
    }

    #[test]
    fn second_player_wins() {
        // O: b1 b2 b3 b4 while X has three in column a.
        let state = setup("12121232");
        assert_eq!(state.winner(), Some(Player::Two));
    }

    #[test]
    fn gaps_and_mixed_lines_do_not_win() {
        // X: a1 b1 d1 e1 with a gap at c1.
        let state = setup("1727475");
        assert_eq!(state.cell(0, 0), Some(Player::One));
        assert_eq!(state.cell(0, 1), Some(Player::One));
        assert_eq!(state.cell(0, 2), None);
        assert_eq!(state.cell(0, 3), Some(Player::One));
        assert_eq!(state.cell(0, 4), Some(Player::One));
        assert_eq!(state.winner(), None);
        // Bottom row X X O X: the O piece interrupts the line.
        let state = setup("17234");
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn parse_errors() {
        assert!(GameState::from_moves("").is_ok());
        assert!(GameState::from_moves("8").is_err());
        assert!(GameState::from_moves("0").is_err());
        assert!(GameState::from_moves("4a").is_err());
        // Seventh piece in the same column.
        assert!(GameState::from_moves("1111111").is_err());
        // Move after the game is over.
        assert!(GameState::from_moves("12121213").is_err());
        assert!(GameState::try_from("4444").is_ok());
    }
}
