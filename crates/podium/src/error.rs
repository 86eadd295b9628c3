use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a deck. Navigation itself never fails.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck contains no slides")]
    Empty,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}
