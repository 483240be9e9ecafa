//! Opening book that learns from self-play.
//!
//! The book maps canonical position keys to per-move outcome statistics and
//! keeps a log of every completed game. Learning is two-sided: a single pass
//! over a finished game credits White's moves and Black's moves from their own
//! perspectives, so one store serves whichever color consults it.
//!
//! - `OpeningBook`: the store itself, with JSON persistence
//! - `GameRecord`: one completed game as appended to the book
//! - `BookStats`: aggregate snapshot for before/after reporting
//! - `BookError`: everything that can go wrong with loading and saving

mod book;
mod error;
mod record;
mod stats;

pub use book::*;
pub use error::BookError;
pub use record::GameRecord;
pub use stats::BookStats;
