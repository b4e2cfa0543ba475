//! Serve command - run the /api reverse proxy.

use anyhow::{Context as _, Result};
use clap::Args;
use console::{Style, style};
use pawship_proxy::{ProxyConfig, ProxyServer, upstream_from_env};

use super::Context;

/// Arguments for the serve command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Upstream API base URL (overrides environment and config)
    #[arg(long)]
    pub upstream: Option<String>,

    /// Disable per-request trace logging
    #[arg(long)]
    pub no_request_logging: bool,

    /// Send permissive CORS headers
    #[arg(long)]
    pub cors: bool,
}

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let section = ctx.config.proxy();

    let bind_addr = match args.bind {
        Some(ref bind) => bind
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", bind))?,
        None => section.bind_addr()?,
    };

    let upstream = match args.upstream {
        Some(url) => url,
        None => upstream_from_env(section.upstream_base_url.as_deref()),
    };

    let config = ProxyConfig::new(bind_addr)
        .with_upstream(&upstream)
        .with_cors(args.cors || section.cors)
        .with_request_logging(section.request_logging && !args.no_request_logging);

    if !ctx.json_output {
        let dim = Style::new().dim();
        println!("{}", style("Pawship proxy").bold());
        println!("{}", dim.apply_to("─".repeat(50)));
        println!("  Listening: http://{}/api", config.bind_addr);
        println!("  Upstream:  {}", config.upstream_base_url);
        println!();
        println!("{}", dim.apply_to("Press Ctrl+C to stop"));
    }

    let server = ProxyServer::new(config)?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down proxy server");
        }
    }

    Ok(())
}
