use thiserror::Error;

/// Errors that abort a training session. Per-game anomalies (an engine that
/// returns no move) are not errors; they discard the game and the session
/// moves on.
#[derive(Error, Debug)]
pub enum TrainerError {
    #[error(transparent)]
    Book(#[from] opening_book::BookError),

    #[error("search failed in game {game}, ply {ply}: {source}")]
    Search {
        game: u32,
        ply: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, TrainerError>;
