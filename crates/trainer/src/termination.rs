use selfplay_core::{Color, PositionKey, Termination};

/// Half-moves without a pawn move or capture before the game is drawn.
pub const HALFMOVE_LIMIT: u32 = 100;
/// Times a position must occur for a repetition draw.
pub const REPETITION_LIMIT: u32 = 3;

/// Snapshot of the position in front of the mover, assembled by the
/// orchestrator from the rules engine and its own bookkeeping.
#[derive(Debug)]
pub struct TerminationCheck<'a> {
    pub key: &'a PositionKey,
    /// Occurrences of `key` in this game, current position included.
    pub repetition_count: u32,
    pub halfmove_clock: u32,
    pub plies_played: u32,
    pub legal_moves: usize,
    pub in_check: bool,
    pub side_to_move: Color,
    pub max_plies: u32,
}

impl TerminationCheck<'_> {
    /// Decide whether the game is over, checking conditions in a fixed
    /// priority order so a position that satisfies several ends for exactly
    /// one reason: repetition, then the fifty-move rule, then mate or
    /// stalemate, then insufficient material, then the ply cap.
    pub fn evaluate(&self) -> Option<Termination> {
        if self.repetition_count >= REPETITION_LIMIT {
            return Some(Termination::Repetition);
        }
        if self.halfmove_clock >= HALFMOVE_LIMIT {
            return Some(Termination::FiftyMoveRule);
        }
        if self.legal_moves == 0 {
            return Some(if self.in_check {
                Termination::Checkmate {
                    winner: self.side_to_move.other(),
                }
            } else {
                Termination::Stalemate
            });
        }
        if insufficient_material(self.key.piece_placement()) {
            return Some(Termination::InsufficientMaterial);
        }
        if self.plies_played >= self.max_plies {
            return Some(Termination::PlyCap);
        }
        None
    }
}

/// Whether a placement field describes a dead draw: bare kings, or a lone
/// minor piece against a bare king. Combinations a full rules engine would
/// also flag (two same-colored bishops, minor versus minor) are left to the
/// other termination rules.
pub fn insufficient_material(placement: &str) -> bool {
    let mut white: Vec<char> = Vec::new();
    let mut black: Vec<char> = Vec::new();
    for ch in placement.chars() {
        match ch {
            'K' | 'k' => {}
            c if c.is_ascii_uppercase() => white.push(c),
            c if c.is_ascii_lowercase() => black.push(c.to_ascii_uppercase()),
            _ => {}
        }
    }
    match (white.as_slice(), black.as_slice()) {
        ([], []) => true,
        ([piece], []) | ([], [piece]) => matches!(piece, 'N' | 'B'),
        _ => false,
    }
}

#[cfg(test)]
#[path = "termination_tests.rs"]
mod termination_tests;
