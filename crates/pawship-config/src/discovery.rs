//! Locating Pawship's files on disk.
//!
//! Everything lives under one config directory: `$PAWSHIP_CONFIG_DIR` when
//! set, else `pawship` under the platform config dir. It holds the user
//! `config.toml`, the session `tokens.json` and the rolling `logs/`.
//!
//! A `pawship.toml` in the working directory is layered over the user file,
//! replacing whole sections.

use std::path::{Path, PathBuf};

use crate::{ConfigError, PawshipConfig, Result};

/// Environment variable that relocates the config directory.
pub const CONFIG_DIR_ENV: &str = "PAWSHIP_CONFIG_DIR";

const USER_CONFIG_FILE: &str = "config.toml";
const PROJECT_CONFIG_FILE: &str = "pawship.toml";
const TOKEN_FILE: &str = "tokens.json";
const LOG_DIR: &str = "logs";

/// Merged configuration, with the files that contributed to it.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: PawshipConfig,
    /// Files merged, lowest precedence first.
    pub loaded_from: Vec<PathBuf>,
    /// Files that exist but could not be used.
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Layer the user config and `./pawship.toml`.
    ///
    /// Never fails: an unreadable or malformed file is skipped with a warning.
    pub fn discover() -> Self {
        Self::discover_in(config_dir().as_deref(), Path::new("."))
    }

    /// [`discover`](Self::discover) with explicit directories.
    pub fn discover_in(config_dir: Option<&Path>, project_dir: &Path) -> Self {
        let mut loaded = Self::default();
        if let Some(dir) = config_dir {
            loaded.layer(&dir.join(USER_CONFIG_FILE));
        }
        loaded.layer(&project_dir.join(PROJECT_CONFIG_FILE));
        loaded
    }

    /// Load exactly the file passed with `--config`. Errors are fatal here.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            config: read_config(path)?,
            loaded_from: vec![path.to_path_buf()],
            warnings: Vec::new(),
        })
    }

    fn layer(&mut self, path: &Path) {
        if !path.is_file() {
            return;
        }
        match read_config(path) {
            Ok(layer) => {
                self.config.merge(layer);
                self.loaded_from.push(path.to_path_buf());
            }
            Err(e) => self.warnings.push(format!("Ignoring {}: {}", path.display(), e)),
        }
    }
}

fn read_config(path: &Path) -> Result<PawshipConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    PawshipConfig::from_toml(&contents)
}

/// The Pawship config directory, if one can be determined.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join("pawship"))
}

/// Where the session tokens live: `[client] token_file`, else
/// `<config dir>/tokens.json`.
pub fn token_file_path(config: &PawshipConfig) -> Option<PathBuf> {
    config
        .client
        .as_ref()
        .and_then(|c| c.token_file.clone())
        .or_else(|| config_dir().map(|d| d.join(TOKEN_FILE)))
}

pub fn log_dir() -> Option<PathBuf> {
    config_dir().map(|d| d.join(LOG_DIR))
}
