use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use selfplay_core::GameOutcome;

/// One completed game as appended to the book's game log.
///
/// The full move list is kept even when learning only consumed the opening
/// window, so the log stays useful for replay and review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// RFC 3339 timestamp of when the game finished.
    pub date: String,
    pub moves: Vec<String>,
    pub result: GameOutcome,
    pub move_count: usize,
}

impl GameRecord {
    pub fn new(moves: Vec<String>, result: GameOutcome) -> Self {
        GameRecord {
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            result,
            move_count: moves.len(),
            moves,
        }
    }

    /// First `max_moves` moves joined for log excerpts, with a trailing
    /// ellipsis when the game ran longer.
    pub fn excerpt(&self, max_moves: usize) -> String {
        let mut text = self
            .moves
            .iter()
            .take(max_moves)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        if self.moves.len() > max_moves {
            text.push_str("...");
        }
        text
    }
}
