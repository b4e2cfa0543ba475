//! Stores command - grooming store management.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::{Style, style};
use pawship_client::{ApiStore, GetStoresParams};

use super::{Context, active_label, print_heading, print_json};

/// Arguments for the stores command.
#[derive(Args, Debug)]
pub struct StoresArgs {
    #[command(subcommand)]
    pub command: StoresCommand,
}

#[derive(Subcommand, Debug)]
pub enum StoresCommand {
    /// List stores
    List {
        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Stores per page
        #[arg(short, long, default_value = "10")]
        limit: u32,

        /// Search by code or name
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by city
        #[arg(long)]
        city: Option<String>,
    },

    /// Show a store's details
    Show {
        /// Store ID
        id: String,
    },
}

/// Run the stores command.
pub async fn run(args: StoresArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let dim = Style::new().dim();

    match args.command {
        StoresCommand::List {
            page,
            limit,
            search,
            city,
        } => {
            let response = client
                .stores()
                .list(&GetStoresParams {
                    page,
                    limit,
                    search,
                    city,
                    ..Default::default()
                })
                .await?;

            if ctx.json_output {
                return print_json(&response);
            }

            print_heading("Stores");
            if response.stores.is_empty() {
                println!("{}", dim.apply_to("No stores found"));
            }
            for store in &response.stores {
                println!(
                    "{} {:<10} {:<28} {:<16} {}",
                    dim.apply_to(format!("[{}]", store.id)),
                    store.code,
                    store.name,
                    city_of(store),
                    active_label(store.is_active)
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
        StoresCommand::Show { id } => {
            let response = client.stores().get(&id).await?;
            if ctx.json_output {
                return print_json(&response);
            }
            print_store(&response.store);
        }
    }

    Ok(())
}

fn city_of(store: &ApiStore) -> &str {
    store
        .location
        .as_ref()
        .and_then(|l| l.city.as_deref())
        .unwrap_or("-")
}

fn print_store(store: &ApiStore) {
    let dim = Style::new().dim();
    print_heading(&format!("{} ({})", store.name, store.code));
    println!("Status:   {}", active_label(store.is_active));
    if let Some(description) = &store.description {
        println!("About:    {}", description);
    }

    if let Some(location) = &store.location {
        let parts: Vec<&str> = [&location.address, &location.city, &location.province]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        if !parts.is_empty() {
            println!("Address:  {}", parts.join(", "));
        }
    }

    if let Some(contact) = &store.contact {
        if let Some(phone) = &contact.phone_number {
            println!("Phone:    {}", phone);
        }
        if let Some(whatsapp) = &contact.whatsapp {
            println!("WhatsApp: {}", whatsapp);
        }
        if let Some(email) = &contact.email {
            println!("Email:    {}", email);
        }
    }

    if let Some(operational) = &store.operational
        && let (Some(open), Some(close)) = (&operational.opening_time, &operational.closing_time)
    {
        let days = operational
            .operational_days
            .as_ref()
            .map(|d| d.join(", "))
            .unwrap_or_default();
        println!("Hours:    {}-{} {}", open, close, dim.apply_to(days));
    }

    if let Some(capacity) = &store.capacity
        && let Some(minutes) = capacity.default_daily_capacity_minutes
    {
        println!("Capacity: {} min/day", minutes);
    }

    println!();
    println!("{}", style(format!("ID {}", store.id)).dim());
}
