use std::io;
use std::num::NonZeroU32;

use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vier::engine::{self, Computer};
use vier::mcts::{Config, DEFAULT_EXPLORATION};
use vier::Engine;

/// Connect Four against a Monte Carlo Tree Search engine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Search iterations per engine move.
    #[arg(long, default_value_t = Config::DEFAULT_ITERATIONS)]
    iterations: NonZeroU32,
    /// UCB1 exploration constant.
    #[arg(long, default_value_t = DEFAULT_EXPLORATION)]
    exploration: f64,
    /// Seed for the search randomness. Seeded from entropy if not given.
    #[arg(long)]
    seed: Option<u64>,
    /// Sides played by the engine.
    #[arg(long, value_enum, default_value_t = Computer::X)]
    computer: Computer,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Play a game in the terminal (default).
    Play,
    /// Measure search speed on a fixed set of positions.
    Bench,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr: stdout is reserved for the game.
    let _logger = Logger::try_with_env_or_str("warn")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    let cli = Cli::parse();
    let config = Config::new(cli.iterations).with_exploration(cli.exploration)?;

    vier::print_engine_info();
    vier::print_binary_info();

    match cli.command.unwrap_or(Command::Play) {
        Command::Bench => engine::bench(&mut io::stdout().lock()),
        Command::Play => {
            let rng = cli
                .seed
                .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
            let mut engine = Engine::new(config, cli.computer, rng);
            engine.play(&mut io::stdin().lock(), &mut io::stdout().lock())
        },
    }
}
