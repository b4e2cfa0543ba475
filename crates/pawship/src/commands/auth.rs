//! Auth command - session management.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::Style;
use pawship_client::RegisterRequest;

use super::{Context, print_heading, print_json, print_success};

/// Arguments for the auth command.
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show whether a session is stored
    Status,

    /// Exchange the stored refresh token for a new pair
    Refresh,

    /// Register a customer account
    Register {
        /// Display name
        #[arg(long)]
        username: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Phone number
        #[arg(long)]
        phone_number: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
}

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthCommand::Login { email, password } => cmd_login(ctx, &email, password).await,
        AuthCommand::Logout => cmd_logout(ctx),
        AuthCommand::Status => cmd_status(ctx),
        AuthCommand::Refresh => cmd_refresh(ctx).await,
        AuthCommand::Register {
            username,
            email,
            phone_number,
            password,
        } => {
            let password = password_or_prompt(password)?;
            cmd_register(
                ctx,
                RegisterRequest {
                    username,
                    email,
                    phone_number,
                    password,
                },
            )
            .await
        }
    }
}

async fn cmd_login(ctx: &Context, email: &str, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let client = ctx.client()?;

    let tokens = client.auth().login(email, &password).await?;
    client.store_tokens(&tokens);

    if ctx.json_output {
        print_json(&serde_json::json!({
            "message": tokens.message,
            "authenticated": true
        }))?;
    } else {
        print_success(&format!("Logged in as {}", email));
        if ctx.verbose && !tokens.message.is_empty() {
            println!("{}", Style::new().dim().apply_to(&tokens.message));
        }
    }
    Ok(())
}

fn cmd_logout(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let was_authenticated = client.is_authenticated();
    client.auth().logout();

    if ctx.json_output {
        print_json(&serde_json::json!({ "logged_out": was_authenticated }))?;
    } else if was_authenticated {
        print_success("Session cleared");
    } else {
        println!("No stored session.");
    }
    Ok(())
}

fn cmd_status(ctx: &Context) -> Result<()> {
    let store = ctx.token_store();
    let has_access = store.get_access_token().is_some();
    let has_refresh = store.get_refresh_token().is_some();
    let token_file = pawship_config::token_file_path(&ctx.config);

    if ctx.json_output {
        return print_json(&serde_json::json!({
            "server": ctx.server_url,
            "authenticated": has_access,
            "refresh_token": has_refresh,
            "token_file": token_file,
        }));
    }

    let dim = Style::new().dim();
    print_heading("Authentication Status");
    println!("Server: {}", ctx.server_url);
    if has_access {
        println!("Session: authenticated");
        if !has_refresh {
            println!("  {}", dim.apply_to("No refresh token; the session ends when the access token expires"));
        }
    } else {
        println!("Session: not authenticated");
        println!("  Run 'pawship auth login --email <EMAIL>' to log in");
    }
    if let Some(path) = token_file {
        println!("{}", dim.apply_to(format!("Token file: {}", path.display())));
    }
    Ok(())
}

async fn cmd_refresh(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let Some(refresh_token) = client.token_store().get_refresh_token() else {
        bail!("Not logged in. Run 'pawship auth login' first.");
    };

    match client.auth().refresh(&refresh_token).await {
        Ok(tokens) => {
            client.store_tokens(&tokens);
            if ctx.json_output {
                print_json(&serde_json::json!({ "refreshed": true }))?;
            } else {
                print_success("Session refreshed");
            }
            Ok(())
        }
        Err(e) => {
            client.auth().logout();
            Err(e.into())
        }
    }
}

async fn cmd_register(ctx: &Context, payload: RegisterRequest) -> Result<()> {
    let client = ctx.client()?;
    let response = client.auth().register(&payload).await?;

    if ctx.json_output {
        print_json(&response)?;
    } else if response.message.is_empty() {
        print_success(&format!("Registered {}", payload.email));
    } else {
        print_success(&response.message);
    }
    Ok(())
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}
