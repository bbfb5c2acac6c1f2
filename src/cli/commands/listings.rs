//! Listing browse with persisted category and currency preferences

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::cli::{session_client, state_bus, ui};
use crate::config::options::registrations::prefs;

#[derive(Subcommand)]
pub enum ListingsCommands {
    /// Browse published listings
    Browse {
        /// Filter by category; persisted as the selected category
        #[arg(long)]
        category: Option<String>,
    },
}

pub async fn listings_command(cmd: ListingsCommands) -> Result<()> {
    let ListingsCommands::Browse { category } = cmd;

    let bus = state_bus().await?;
    let (client, _session) = session_client(&bus).await?;

    let category = match category {
        Some(category) => {
            // Registry validation rejects unknown categories
            bus.set_string(prefs::CATEGORY, category.clone()).await?;
            category
        }
        None => bus.get_string(prefs::CATEGORY).await?,
    };
    let currency = bus.get_string(prefs::CURRENCY).await?;

    let listings = client.list_listings(&category).await?;

    ui::header(&format!("Hearth Listings — {}", category));
    println!();
    if listings.is_empty() {
        println!("  {}", "No listings in this category".dimmed());
    }
    for listing in &listings {
        println!(
            "  {}  {}",
            listing.title.bright_white().bold(),
            ui::format_price(listing.price_cents, &currency).bright_green()
        );
        println!(
            "    {} · {} · {} bedrooms",
            listing.category.cyan(),
            listing.city,
            listing.bedrooms
        );
    }
    Ok(())
}
