/// High-score persistence: a single integer that survives between runs.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};

pub trait HighScoreStore {
    /// Stored best score, `0` if nothing has been recorded yet.
    fn load(&self) -> Result<u32>;
    fn save(&mut self, score: u32) -> Result<()>;
}

/// Write `score` only if it beats the stored value.  Returns whether it did.
/// An unreadable store counts as 0, so a corrupt file gets overwritten.
pub fn record_high_score<S: HighScoreStore + ?Sized>(store: &mut S, score: u32) -> Result<bool> {
    if score > load_or_zero(&*store) {
        store.save(score)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Load the best score, falling back to 0 (with a warning) if the store is
/// unreadable.  A broken score file should never keep the game from starting.
pub fn load_or_zero<S: HighScoreStore + ?Sized>(store: &S) -> u32 {
    store.load().unwrap_or_else(|err| {
        tracing::warn!(%err, "could not read high score, starting from 0");
        0
    })
}

// ── File-backed ──────────────────────────────────────────────────────────────

/// Plain-text file holding the score as a decimal number.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileScoreStore { path: path.into() }
    }

    /// `~/.galaga_next_score`, or the working directory if there is no home.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".galaga_next_score")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileScoreStore {
    fn load(&self) -> Result<u32> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(GameError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        contents.trim().parse().map_err(|_| GameError::ScoreFormat {
            path: self.path.clone(),
            contents,
        })
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GameError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, score.to_string()).map_err(|source| GameError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

// ── In-memory ────────────────────────────────────────────────────────────────

/// Non-durable store, for tests and `--no-save` style runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    score: u32,
}

impl HighScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.score)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.score = score;
        Ok(())
    }
}
