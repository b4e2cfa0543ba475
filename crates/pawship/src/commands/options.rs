//! Options command - the configurable option catalog.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;
use pawship_client::CategoryOption;

use super::{Context, active_label, print_heading, print_json};

/// Arguments for the options command.
#[derive(Args, Debug)]
pub struct OptionsArgs {
    #[command(subcommand)]
    pub command: OptionsCommand,
}

#[derive(Subcommand, Debug)]
pub enum OptionsCommand {
    /// List options
    List {
        /// Restrict to one category, e.g. "breed category" or "service type"
        #[arg(short, long)]
        category: Option<CategoryOption>,
    },
}

/// Run the options command.
pub async fn run(args: OptionsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let dim = Style::new().dim();

    match args.command {
        OptionsCommand::List { category } => {
            let response = client.options().list(category).await?;

            if ctx.json_output {
                return print_json(&response);
            }

            print_heading("Options");
            if response.options.is_empty() {
                println!("{}", dim.apply_to("No options found"));
            }
            for option in &response.options {
                println!(
                    "{} {:<24} {:<18} {}",
                    dim.apply_to(format!("[{}]", option.id)),
                    option.name,
                    option.category_options.as_str(),
                    active_label(option.is_active)
                );
            }
        }
    }

    Ok(())
}
