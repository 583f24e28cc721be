//! Implementation of the Connect Four game, its rules and specifics: a 6×7
//! board where pieces drop to the lowest free cell of a column and the first
//! player to line up four of them wins.

pub mod core;
pub mod state;
