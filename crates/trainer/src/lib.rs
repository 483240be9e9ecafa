//! Self-play training orchestration.
//!
//! A session plays engine-vs-engine games, detects how each game ends, feeds
//! finished games to the opening book and reports what the book gained. The
//! engine itself stays behind the `selfplay_core` facade traits, so anything
//! that can enumerate legal moves and search a position can train here.
//!
//! - `session`: load book, play N games, save, summarize
//! - `selfplay`: the per-game move loop
//! - `termination`: rules-level end-of-game detection
//! - `game`: trainer-owned histories and the half-move clock
//! - `logging`: console plus optional file logging

pub mod error;
pub mod game;
pub mod logging;
pub mod selfplay;
pub mod session;
pub mod termination;

pub use error::{Result, TrainerError};
pub use game::*;
pub use selfplay::*;
pub use session::*;
pub use termination::*;

#[cfg(test)]
mod stub_engine;
