//! Culture Core - shared configuration for every culture-events interface.
//!
//! - **config**: state directory layout and environment overrides

pub mod config;

pub use config::{
    config_dir_in, data_dir_in, ensure_state_dirs, env_file, env_file_in, state_dir, DATA_DIR_ENV,
    DEFAULT_LATENCY_MS, LATENCY_MS_ENV, STATE_DIR_ENV,
};
