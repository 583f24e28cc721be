//! The engine puts all pieces together: it owns the authoritative game state,
//! asks the search for moves on the engine's turns and reads the human's moves
//! from the input stream on the other turns.
//!
//! [`Engine::play`] is the "main loop" of the engine which communicates with
//! the player and executes the moves.

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use log::{info, warn};
use rand::Rng;

use crate::game::core::{Player, COLUMNS};
use crate::game::state::GameState;
use crate::mcts::{self, Config};

mod bench;
pub use bench::bench;

/// Sides played by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Computer {
    /// The engine plays [`Player::One`], the human replies.
    X,
    /// The human starts, the engine plays [`Player::Two`].
    O,
    /// The engine plays against itself.
    Both,
    /// Two humans share the terminal.
    #[value(name = "none")]
    Neither,
}

impl Computer {
    /// Whether the engine makes the moves of `player`.
    #[must_use]
    pub const fn controls(self, player: Player) -> bool {
        matches!(
            (self, player),
            (Self::Both, _) | (Self::X, Player::One) | (Self::O, Player::Two)
        )
    }
}

/// The Engine connects the game rules and the search and handles the I/O.
pub struct Engine<R: Rng> {
    state: GameState,
    config: Config,
    computer: Computer,
    rng: R,
}

impl<R: Rng> Engine<R> {
    /// Creates a new instance of the engine with an empty board.
    #[must_use]
    pub fn new(config: Config, computer: Computer, rng: R) -> Self {
        Self {
            state: GameState::new(),
            config,
            computer,
            rng,
        }
    }

    /// Current position of the game.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Plays the game until it is over, writing the board before every move.
    ///
    /// Human moves are read from `input` one per line as 1-indexed column
    /// numbers. Input that is not a number or an illegal move is reported and
    /// the same player is asked again. If the input ends before the game is
    /// over, the session stops without an error.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing the output fails.
    pub fn play(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
        while !self.state.is_over() {
            write!(output, "{}", self.state)?;
            let player = self.state.side_to_move();

            if self.computer.controls(player) {
                let column = mcts::decide_move(&self.state, &self.config, &mut self.rng)?;
                let _ = self.state.apply_move(column)?;
                writeln!(output, "{player} plays column {}", column + 1)?;
                continue;
            }

            write!(output, "Choose column ({player}): ")?;
            output.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                info!("input ended before the game was over");
                return Ok(());
            }
            let column = match parse_column(&line) {
                Ok(column) => column,
                Err(e) => {
                    writeln!(output, "{e}")?;
                    continue;
                },
            };
            if let Err(e) = self.state.apply_move(column) {
                warn!("rejected move from {player}: {e}");
                writeln!(output, "Invalid move: {e}")?;
            }
        }

        write!(output, "{}", self.state)?;
        if let Some(outcome) = self.state.outcome() {
            info!("game over after {} moves: {outcome}", self.state.pieces());
            writeln!(output, "{outcome}")?;
        }
        Ok(())
    }
}

/// Reads a 1-indexed column number typed by a human and converts it to the
/// column index.
fn parse_column(line: &str) -> anyhow::Result<usize> {
    let line = line.trim();
    let column: usize = line
        .parse()
        .with_context(|| format!("Expected a column number in 1..={COLUMNS}, got {line:?}"))?;
    if !(1..=COLUMNS).contains(&column) {
        bail!("Expected a column number in 1..={COLUMNS}, got {column}");
    }
    Ok(column - 1)
}
