//! Users command - user management.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;
use pawship_client::{ApiRole, GetUsersParams};

use super::{Context, active_label, print_heading, print_json, print_success};

/// Arguments for the users command.
#[derive(Args, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users
    List {
        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Users per page
        #[arg(short, long, default_value = "10")]
        limit: u32,

        /// Search by name, email or phone
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by role (admin, ops, groomer, customer)
        #[arg(long)]
        role: Option<ApiRole>,

        /// Filter by active flag
        #[arg(long)]
        active: Option<bool>,
    },

    /// Activate or deactivate a user
    SetActive {
        /// User ID
        id: String,

        /// New active flag
        #[arg(action = clap::ArgAction::Set)]
        active: bool,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: String,
    },
}

/// Run the users command.
pub async fn run(args: UsersArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let dim = Style::new().dim();

    match args.command {
        UsersCommand::List {
            page,
            limit,
            search,
            role,
            active,
        } => {
            let response = client
                .users()
                .list(&GetUsersParams {
                    page,
                    limit,
                    search,
                    role,
                    is_active: active,
                })
                .await?;

            if ctx.json_output {
                return print_json(&response);
            }

            print_heading("Users");
            if response.users.is_empty() {
                println!("{}", dim.apply_to("No users found"));
            }
            for user in &response.users {
                println!(
                    "{} {:<20} {:<28} {:<9} {}",
                    dim.apply_to(format!("[{}]", user.id)),
                    user.username,
                    user.email,
                    user.role.as_str(),
                    active_label(user.is_active)
                );
            }
            let p = &response.pagination;
            println!();
            println!(
                "{}",
                dim.apply_to(format!(
                    "Page {} of {} ({} total)",
                    p.page, p.total_pages, p.total
                ))
            );
        }
        UsersCommand::SetActive { id, active } => {
            let response = client.users().toggle_status(&id, active).await?;
            if ctx.json_output {
                return print_json(&response);
            }
            print_success(&format!("User {} is now {}", id, active_label(active)));
        }
        UsersCommand::Delete { id } => {
            let response = client.users().delete(&id).await?;
            if ctx.json_output {
                return print_json(&response);
            }
            print_success(&format!("User {} deleted", id));
        }
    }

    Ok(())
}
