//! Configuration for the Pawship CLI and proxy.
//!
//! Provides TOML-based configuration with:
//! - A `[client]` section for the API client (server URL, timeout, token file)
//! - A `[proxy]` section for the reverse proxy (bind address, upstream, logging)
//! - Config file layering (XDG user config + project-local overrides)

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{CONFIG_DIR_ENV, LoadedConfig, config_dir, log_dir, token_file_path};
pub use error::{ConfigError, Result};
pub use types::*;
