//! Fixed-workload benchmark of the search. Unlike the criterion benchmarks it
//! ships with the binary, so the speed of a build can be checked on any
//! machine with `vier bench`.

use std::io::Write;
use std::num::NonZeroU32;
use std::time::Instant;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game::state::GameState;
use crate::mcts::{self, Config};

const ITERATIONS: NonZeroU32 = match NonZeroU32::new(20_000) {
    Some(iterations) => iterations,
    None => panic!("iteration budget must be positive"),
};

const SEED: u64 = 0x5EED;

/// Opening, early middlegame, a position with an immediate threat and a
/// nearly full board.
const POSITIONS: [&str; 4] = [
    "",
    "4453",
    "12121",
    "11122233311122233344455566644455566677777",
];

/// Runs search on a small set of positions to provide an estimate of engine's
/// performance. Prints the total number of iterations and iterations per
/// second.
///
/// # Errors
///
/// Returns an error if writing to `output` fails.
pub fn bench(output: &mut impl Write) -> anyhow::Result<()> {
    let config = Config::new(ITERATIONS);
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut total_iterations: u64 = 0;
    let timer = Instant::now();

    for moves in POSITIONS {
        let state = GameState::from_moves(moves)?;
        let column = mcts::decide_move(&state, &config, &mut rng)?;
        debug!("bench position {moves:?}: column {column}");
        total_iterations += u64::from(config.iterations());
    }

    let elapsed = timer.elapsed();
    writeln!(
        output,
        "{} iterations {} ips",
        total_iterations,
        (total_iterations as f64 / elapsed.as_secs_f64()) as u64,
    )?;
    Ok(())
}
