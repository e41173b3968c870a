//! Runtime configuration from environment variables.
//!
//! - `TETRIS_SEED`: Piece sequence seed (default: seeded from the OS)
//! - `TETRIS_LOG_PATH`: File to append log records to (default: logging off)
//! - `TETRIS_LOG`: Log level filter (default: "info")
//! - `TETRIS_KEY_RELEASE_MS`: How long a key counts as held after its last
//!   press when the terminal does not report releases (default: 150)

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;

const DEFAULT_KEY_RELEASE_MS: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub key_release_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            log_level: LevelFilter::Info,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_MS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let seed = get("TETRIS_SEED").and_then(|s| s.parse().ok());
        let log_path = get("TETRIS_LOG_PATH").map(PathBuf::from);
        let log_level = get("TETRIS_LOG")
            .and_then(|s| s.parse().ok())
            .unwrap_or(LevelFilter::Info);
        let key_release_timeout_ms = get("TETRIS_KEY_RELEASE_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(DEFAULT_KEY_RELEASE_MS);

        Self {
            seed,
            log_path,
            log_level,
            key_release_timeout_ms,
        }
    }

    /// Route `log` records to the configured file.
    ///
    /// The terminal is owned by the game while it runs, so records never go
    /// to stderr. Returns false when no log path is set.
    pub fn init_logging(&self) -> Result<bool> {
        let Some(path) = &self.log_path else {
            return Ok(false);
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;

        env_logger::Builder::new()
            .filter_level(self.log_level)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()
            .context("installing logger")?;
        Ok(true)
    }
}
