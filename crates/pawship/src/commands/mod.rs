//! CLI command handlers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use console::Style;
use pawship_client::{ApiClient, FileTokenStore, NullTokenStore, SharedTokenStore};
use pawship_config::PawshipConfig;

pub mod auth;
pub mod options;
pub mod request;
pub mod serve;
pub mod stores;
pub mod users;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Server URL the API client mounts `/api` under.
    pub server_url: String,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
    /// Merged configuration.
    pub config: PawshipConfig,
}

impl Context {
    /// Token store backing the CLI session.
    ///
    /// Falls back to a storage-less store when no config directory exists.
    pub fn token_store(&self) -> SharedTokenStore {
        match pawship_config::token_file_path(&self.config) {
            Some(path) => Arc::new(FileTokenStore::with_path(path)),
            None => {
                tracing::warn!("No config directory available, session will not persist");
                Arc::new(NullTokenStore)
            }
        }
    }

    /// Build an API client for this invocation.
    pub fn client(&self) -> Result<ApiClient> {
        let mut builder = ApiClient::builder()
            .base_url(&self.server_url)
            .token_store(self.token_store());
        if let Some(secs) = self.config.client().timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a section heading with a rule underneath.
pub fn print_heading(title: &str) {
    let dim = Style::new().dim();
    println!("{}", console::style(title).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
}

/// Print a success line.
pub fn print_success(message: &str) {
    let green = Style::new().green();
    println!("{} {}", green.apply_to("✓"), message);
}

/// Render an active flag.
pub fn active_label(is_active: bool) -> String {
    if is_active {
        Style::new().green().apply_to("active").to_string()
    } else {
        Style::new().dim().apply_to("inactive").to_string()
    }
}
