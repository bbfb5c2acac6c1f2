//! Preference access through the state bus

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use crate::cli::{state_bus, ui};
use crate::config::options::{OptionType, OptionValue};

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// List all preferences with their current values
    List,
    /// Print the current value of one preference
    Get { key: String },
    /// Set a preference (broadcast to all subscribers)
    Set { key: String, value: String },
    /// Print each change to a preference until interrupted
    Watch { key: String },
}

pub async fn prefs_command(cmd: PrefsCommands) -> Result<()> {
    match cmd {
        PrefsCommands::List => list().await,
        PrefsCommands::Get { key } => get(&key).await,
        PrefsCommands::Set { key, value } => set(&key, &value).await,
        PrefsCommands::Watch { key } => watch(&key).await,
    }
}

async fn list() -> Result<()> {
    ui::header("Hearth Preferences");
    let options = &crate::global_config().options;

    for namespace in options.registry().namespaces() {
        println!();
        println!("  {}", namespace.bright_white().bold());
        for def in options.registry().list_namespace(&namespace) {
            let value = options.get_encoded(&def.key).await?;
            println!(
                "    {} = {}  {}",
                def.key.cyan(),
                value.bright_yellow(),
                def.display_name.dimmed()
            );
        }
    }
    Ok(())
}

async fn get(key: &str) -> Result<()> {
    let options = &crate::global_config().options;
    println!("{}", options.get_encoded(key).await?);
    Ok(())
}

async fn set(key: &str, raw: &str) -> Result<()> {
    let bus = state_bus().await?;

    let def = bus
        .options()
        .registry()
        .get(key)
        .ok_or_else(|| anyhow::anyhow!("Unknown preference '{}'", key))?;

    let value = match def.ty {
        OptionType::Bool => OptionValue::Bool(
            raw.parse()
                .with_context(|| format!("'{}' is not a bool", raw))?,
        ),
        OptionType::UInt { .. } => OptionValue::UInt(
            raw.parse()
                .with_context(|| format!("'{}' is not an unsigned integer", raw))?,
        ),
        OptionType::String { .. } | OptionType::Enum { .. } => {
            OptionValue::String(raw.to_string())
        }
    };

    bus.set(key, value).await?;
    println!("  {} {} = {}", "✓".bright_green(), key.cyan(), raw);
    Ok(())
}

async fn watch(key: &str) -> Result<()> {
    let bus = state_bus().await?;

    let initial = bus.options().get_encoded(key).await?;
    println!("  {} = {}", key.cyan(), initial.bright_yellow());
    println!("  {}", "Watching for changes, Ctrl+C to stop...".dimmed());

    let watched = key.to_string();
    let handle = bus.subscribe(key, move |value| {
        println!("  {} = {}", watched.cyan(), value.bright_yellow());
    });

    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for Ctrl+C")?;
    handle.dispose();
    Ok(())
}
