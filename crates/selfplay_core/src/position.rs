//! Canonical position keys.
//!
//! A key is a serialized position with the half-move and full-move counters
//! stripped, so positions reached by different move orders compare equal.
//! The same key feeds threefold-repetition counting and opening-book lookups.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Counter-stripped serialized position. Equality is exact string equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionKey(String);

impl PositionKey {
    /// Build a key from a serialized position (FEN or FEN-like). Keeps the
    /// placement, side-to-move, castling and en-passant fields; anything
    /// after the fourth field is dropped. Positions with fewer fields are
    /// kept as-is.
    pub fn from_position(serialized: &str) -> Self {
        let fields: Vec<&str> = serialized.split_whitespace().take(4).collect();
        PositionKey(fields.join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The piece-placement field (everything before the first space).
    pub fn piece_placement(&self) -> &str {
        self.0.split(' ').next().unwrap_or("")
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
