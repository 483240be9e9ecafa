/// Aggregate snapshot of the book, derived by scanning it. Never persisted;
/// the session reporter takes one before and one after training and prints
/// the difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookStats {
    /// Positions present in the book for any reason.
    pub total_positions: usize,
    /// Positions with at least one move that has recorded games.
    pub positions_with_learning: usize,
    pub our_games: u64,
    pub our_wins: u64,
    pub our_losses: u64,
    pub our_draws: u64,
}
