use std::collections::HashMap;

use selfplay_core::PositionKey;

/// Trainer-owned bookkeeping for one game in progress. The rules engine owns
/// the board; this tracks the histories that termination detection and book
/// learning need.
///
/// Positions are snapshotted before each move and once more for the terminal
/// position, so `keys()` is always one longer than `moves()` when a game ends
/// normally.
#[derive(Debug, Default)]
pub struct GameState {
    keys: Vec<PositionKey>,
    moves: Vec<String>,
    repetitions: HashMap<PositionKey, u32>,
    halfmove_clock: u32,
}

impl GameState {
    pub fn new() -> Self {
        GameState::default()
    }

    /// Record arrival at a position and return how many times it has now
    /// been seen this game.
    pub fn visit(&mut self, key: PositionKey) -> u32 {
        let count = self.repetitions.entry(key.clone()).or_insert(0);
        *count += 1;
        let count = *count;
        self.keys.push(key);
        count
    }

    /// Record a played move. `resets_clock` is true for pawn moves and
    /// captures.
    pub fn record_move(&mut self, text: String, resets_clock: bool) {
        self.moves.push(text);
        if resets_clock {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
    }

    /// Moves played so far; also the 0-based index of the next ply.
    pub fn plies(&self) -> u32 {
        self.moves.len() as u32
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn keys(&self) -> &[PositionKey] {
        &self.keys
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
