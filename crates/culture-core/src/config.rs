//! Shared configuration for culture-events.
//!
//! Locates the state directory and the files inside it.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.culture-events/
//! ├── data/         # Key-value store (one JSON file per key)
//! │   └── cultural-events.json
//! └── config/
//!     └── .env.local
//! ```
//!
//! # Environment Variables
//!
//! - `CULTURE_STATE_DIR`: Override the base state directory
//! - `CULTURE_DATA_DIR`: Override the key-value data directory
//! - `CULTURE_LATENCY_MS`: Simulated repository latency in milliseconds

use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "CULTURE_STATE_DIR";

/// Environment variable for custom data directory.
pub const DATA_DIR_ENV: &str = "CULTURE_DATA_DIR";

/// Environment variable for the simulated repository latency.
pub const LATENCY_MS_ENV: &str = "CULTURE_LATENCY_MS";

/// Latency applied to every repository call unless overridden.
pub const DEFAULT_LATENCY_MS: u64 = 800;

const DEFAULT_STATE_DIR: &str = ".culture-events";

const DATA_SUBDIR: &str = "data";
const CONFIG_SUBDIR: &str = "config";
const ENV_FILE: &str = ".env.local";

/// Get the state directory.
///
/// Resolved from:
/// 1. `CULTURE_STATE_DIR` environment variable if set
/// 2. `~/.culture-events` if home directory is available
/// 3. `.culture-events` in current directory as fallback
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// Get the data directory for a given state directory.
///
/// `CULTURE_DATA_DIR` wins when set.
pub fn data_dir_in(state: &Path) -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state.join(DATA_SUBDIR))
}

pub fn config_dir_in(state: &Path) -> PathBuf {
    state.join(CONFIG_SUBDIR)
}

/// Get the .env.local file path under the default state directory.
pub fn env_file() -> PathBuf {
    env_file_in(&state_dir())
}

/// Get the .env.local file path for a given state directory.
pub fn env_file_in(state: &Path) -> PathBuf {
    config_dir_in(state).join(ENV_FILE)
}

/// Ensure the data and config directories exist under `state`.
///
/// # Errors
/// Returns an error if any directory cannot be created.
pub fn ensure_state_dirs(state: &Path) -> std::io::Result<()> {
    for dir in [data_dir_in(state), config_dir_in(state)] {
        if !dir.exists() {
            debug!(path = %dir.display(), "creating directory");
            std::fs::create_dir_all(&dir)?;
        }
    }
    Ok(())
}
