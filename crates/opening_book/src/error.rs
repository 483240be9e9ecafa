use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or saving the opening book.
#[derive(Error, Debug)]
pub enum BookError {
    #[error("failed to access opening book at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but cannot be trusted: malformed JSON or statistics
    /// that violate the per-move accounting invariant.
    #[error("opening book at {} is corrupt: {detail}", path.display())]
    Corrupt { path: PathBuf, detail: String },

    #[error("failed to serialize opening book: {0}")]
    Serialize(#[from] serde_json::Error),
}
