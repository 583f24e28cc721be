//! Connect Four engine that picks its moves with Monte Carlo Tree Search.
//!
//! The crate is split into the game rules ([`game`]), the search
//! ([`mcts`]) and the terminal front end ([`engine`]) that glues them
//! together.

// Performance is extremely important: the search spends nearly all of its
// time in random playouts.
#![deny(clippy::perf)]

pub mod engine;
pub mod game;
pub mod mcts;

pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Build configuration the engine cares about. Produced by `build.rs`.
const FEATURES: &str = include_str!(concat!(env!("OUT_DIR"), "/features"));

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
#[must_use]
pub fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints information about the engine version on startup.
pub fn print_engine_info() {
    println!("Vier Connect Four engine {}", engine_version());
}

/// Prints information the build type, features and whether the build is clean
/// on engine startup.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    println!("Features: {FEATURES}");
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
