pub mod position;
pub mod types;

// Re-export the shared vocabulary (not engine-specific)
pub use position::PositionKey;
pub use types::*;

use std::fmt;

// =============================================================================
// Game engine facade — the narrow interface the training loop consumes
// =============================================================================

/// Result of a single search invocation.
#[derive(Debug, Clone)]
pub struct SearchOutcome<M> {
    /// The best move found (None if the engine produced no move)
    pub best_move: Option<M>,
    /// Evaluation score in centipawns from the mover's perspective
    pub score: i32,
    /// Search depth actually reached
    pub depth: u8,
}

/// Board and rules operations the trainer needs from an external engine.
///
/// Implementations wrap a concrete engine's board representation. The trainer
/// never inspects squares itself: everything position-shaped goes through
/// `serialize`, from which it derives canonical [`PositionKey`]s for
/// repetition counting, book updates and the material check.
pub trait GameRules {
    type Board;
    /// Moves must render as algebraic text (UCI or equivalent); that text is
    /// the opening book's per-move key.
    type Move: Clone + fmt::Display;

    /// A board in the standard starting position.
    fn new_board(&self) -> Self::Board;

    /// All legal moves for the side to move.
    fn legal_moves(&self, board: &Self::Board) -> Vec<Self::Move>;

    /// Whether the side to move is in check.
    fn in_check(&self, board: &Self::Board) -> bool;

    /// Apply a legal move in place.
    fn apply(&self, board: &mut Self::Board, mv: &Self::Move);

    /// Serialize the position as whitespace-separated fields, FEN-style:
    /// placement, side to move, castling, en passant, then any counters.
    fn serialize(&self, board: &Self::Board) -> String;

    /// How often the engine has seen the current position in its own game
    /// history. Reported in per-move logs; the trainer keeps its own count
    /// for the threefold-repetition rule.
    fn repetition_count(&self, board: &Self::Board) -> u32;

    /// Whether the move would reset the half-move clock (pawn move or
    /// capture). The trainer owns the clock but cannot classify moves.
    fn is_pawn_move_or_capture(&self, board: &Self::Board, mv: &Self::Move) -> bool;
}

/// Search operations the trainer needs from an external engine.
///
/// The search call is blocking and may parallelize internally across
/// `workers` threads; the trainer passes the hint through and waits.
pub trait SearchEngine<R: GameRules> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Search the position and return the best move found.
    ///
    /// `ply` is 1-based (the ply about to be played). A successful return
    /// with `best_move: None` while legal moves exist is treated by the
    /// trainer as a rules anomaly, distinct from an `Err`.
    fn search(
        &mut self,
        board: &R::Board,
        ply: u32,
        depth: u8,
        workers: usize,
    ) -> Result<SearchOutcome<R::Move>, Self::Error>;

    /// Set the same contempt bias in centipawns for both sides. Callers
    /// derive the bias from a draw value via [`contempt_centipawns`].
    fn set_contempt(&mut self, centipawns: i32);

    /// Set per-side contempt biases in centipawns.
    fn set_asymmetric_contempt(&mut self, white: i32, black: i32);

    /// Toggle exploratory move selection for self-play training.
    fn set_training_mode(&mut self, enabled: bool);
}
