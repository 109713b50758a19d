use std::path::PathBuf;

use thiserror::Error;

/// Failures of the host-side collaborators.  The simulation itself has no
/// error paths: player death is a phase change, not an error.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("high-score file {} does not hold a score: {contents:?}", path.display())]
    ScoreFormat { path: PathBuf, contents: String },
}

pub type Result<T> = std::result::Result<T, GameError>;
