//! Shared vocabulary for the training loop: sides, outcomes, termination
//! reasons and the contempt translation.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Side that chooses the move at a 0-based ply index (White plays ply 0).
    pub fn mover_at(ply_index: usize) -> Color {
        if ply_index % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Final outcome of a completed game.
///
/// Serializes as the book's historical `"white"` / `"black"` / `"draw"`
/// strings so persisted game records stay readable across runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[serde(rename = "white")]
    WhiteWins,
    #[serde(rename = "black")]
    BlackWins,
    #[serde(rename = "draw")]
    Draw,
}

impl GameOutcome {
    /// Winner, if the game had one.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::WhiteWins => Some(Color::White),
            GameOutcome::BlackWins => Some(Color::Black),
            GameOutcome::Draw => None,
        }
    }

    /// Short label for log lines and summaries.
    pub fn label(self) -> &'static str {
        match self {
            GameOutcome::WhiteWins => "white wins",
            GameOutcome::BlackWins => "black wins",
            GameOutcome::Draw => "draw",
        }
    }
}

/// Why a game ended. The orchestrator checks these conditions in a fixed
/// priority order (repetition, fifty-move, mate/stalemate, material, ply
/// cap), so a position that satisfies several still ends for one reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Repetition,
    FiftyMoveRule,
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    PlyCap,
}

impl Termination {
    pub fn outcome(self) -> GameOutcome {
        match self {
            Termination::Checkmate {
                winner: Color::White,
            } => GameOutcome::WhiteWins,
            Termination::Checkmate {
                winner: Color::Black,
            } => GameOutcome::BlackWins,
            _ => GameOutcome::Draw,
        }
    }

    /// Short label for per-game log lines.
    pub fn label(self) -> &'static str {
        match self {
            Termination::Repetition => "threefold repetition",
            Termination::FiftyMoveRule => "fifty-move rule",
            Termination::Checkmate { .. } => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::InsufficientMaterial => "insufficient material",
            Termination::PlyCap => "ply cap",
        }
    }
}

/// Translate a draw value in [0, 1] to the centipawn contempt bias reported
/// alongside it: 0.0 (draws count as losses) maps to +50cp, 0.5 (neutral)
/// to 0cp, 1.0 (draws count as wins) to -50cp.
pub fn contempt_centipawns(draw_value: f64) -> i32 {
    ((0.5 - draw_value) * 100.0).round() as i32
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
