/// Runtime configuration for the terminal host.
///
/// Gameplay tuning is compiled in; this only covers how the host runs:
/// frame rate, input feel, where files go, and the RNG seed.  Values come
/// from an optional TOML file and are then overridden by CLI flags.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GameError, Result};
use crate::score_store::FileScoreStore;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Simulation ticks (and frames) per second.
    pub fps: u32,
    /// A key counts as held if it was pressed or repeated within this many
    /// frames.  Only matters on terminals that never report key release.
    pub hold_window: u64,
    pub score_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Fixed RNG seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Ring the terminal bell for explosions and game over.
    pub bell: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fps: 60,
            hold_window: 8,
            score_file: None,
            log_file: None,
            log_filter: "info".to_string(),
            seed: None,
            bell: false,
        }
    }
}

impl Config {
    /// `<config dir>/galaga_next/config.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("galaga_next").join("config.toml"))
    }

    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path`; a missing file just means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text, path),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(source) => Err(GameError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.clamp(1, 240)))
    }

    pub fn score_path(&self) -> PathBuf {
        self.score_file
            .clone()
            .unwrap_or_else(FileScoreStore::default_path)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".galaga_next.log")
        })
    }
}
