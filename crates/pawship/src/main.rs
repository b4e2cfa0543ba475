//! Pawship - command-line client and API proxy for the Pawship grooming backend
//!
//! Main entry point for the Pawship CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{auth, options, request, serve, stores, users};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Pawship - command-line client and API proxy for the Pawship grooming backend
#[derive(Parser)]
#[command(name = "pawship")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Server URL the API is mounted under (default: http://localhost:3000)
    #[arg(long, global = true, env = "PAWSHIP_SERVER_URL")]
    pub server: Option<String>,

    /// Path to config file (overrides default discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the /api reverse proxy
    Serve(serve::ServeArgs),

    /// Log in, log out and manage the stored session
    Auth(auth::AuthArgs),

    /// User management
    Users(users::UsersArgs),

    /// Option catalog (breeds, sizes, service types, ...)
    Options(options::OptionsArgs),

    /// Store management
    Stores(stores::StoresArgs),

    /// Send a raw API request and print the JSON payload
    Request(request::RequestArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "pawship=debug,pawship_client=debug,pawship_proxy=debug,pawship_config=debug,tower_http=debug,info"
    } else {
        "pawship=info,pawship_client=info,pawship_proxy=info,tower_http=info,warn"
    };

    let log_dir = pawship_config::log_dir().unwrap_or_else(|| PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "pawship.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "pawship=trace,pawship_client=trace,pawship_proxy=trace,pawship_config=trace,tower_http=debug,info",
                )),
        )
        .init();

    let loaded = match cli.config {
        Some(ref path) => pawship_config::LoadedConfig::from_file(path)?,
        None => pawship_config::LoadedConfig::discover(),
    };

    for warning in &loaded.warnings {
        eprintln!("warning: {}", warning);
    }
    if cli.verbose {
        for source in &loaded.loaded_from {
            eprintln!("Loaded config: {}", source.display());
        }
    }

    let client_config = loaded.config.client();
    let server_url = cli.server.unwrap_or_else(|| client_config.server_url.clone());

    let ctx = commands::Context {
        server_url,
        json_output: cli.json,
        verbose: cli.verbose,
        config: loaded.config,
    };

    match cli.command {
        Commands::Serve(args) => serve::run(args, &ctx).await,
        Commands::Auth(args) => auth::run(args, &ctx).await,
        Commands::Users(args) => users::run(args, &ctx).await,
        Commands::Options(args) => options::run(args, &ctx).await,
        Commands::Stores(args) => stores::run(args, &ctx).await,
        Commands::Request(args) => request::run(args, &ctx).await,
    }
}
