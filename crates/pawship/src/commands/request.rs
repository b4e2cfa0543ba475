//! Request command - raw API calls.

use anyhow::{Context as _, Result};
use clap::Args;
use console::Style;
use pawship_client::{ApiRequest, Method};

use super::{Context, print_json};

/// Arguments for the request command.
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: String,

    /// Path under /api, or an absolute http(s) URL
    pub path: String,

    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,

    /// Attach the stored session token
    #[arg(short, long)]
    pub auth: bool,
}

/// Run the request command.
pub async fn run(args: RequestArgs, ctx: &Context) -> Result<()> {
    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method '{}'", args.method))?;

    let mut request = ApiRequest::new(method, args.path).auth(args.auth);
    if let Some(data) = args.data {
        let body: serde_json::Value =
            serde_json::from_str(&data).context("--data must be valid JSON")?;
        request = request.json(&body)?;
    }

    let client = ctx.client()?;
    match client.request(request).await? {
        Some(payload) => print_json(&payload)?,
        None if ctx.json_output => println!("null"),
        None => println!("{}", Style::new().dim().apply_to("(no content)")),
    }

    Ok(())
}
