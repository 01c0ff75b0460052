//! `fieldctl list` - show the base components a new component can extend

use anyhow::{bail, Context, Result};
use clap::Parser;
use fieldctl_core::Scaffolder;
use serde_json::json;
use tracing::warn;

use crate::ui;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: String,
}

pub fn run_list(scaffolder: &mut Scaffolder, args: ListArgs) -> Result<()> {
    let listing = scaffolder
        .catalog_mut()
        .list_all()
        .context("Failed to list base components")?;

    for (file, reason) in &listing.skipped {
        warn!(file = %file, reason = %reason, "Skipped base component");
    }

    match args.format.as_str() {
        "text" => {
            if listing.components.is_empty() {
                println!("ℹ️ No base components found.");
            } else {
                ui::render_components(&listing.components);
            }
        }
        "json" => {
            let items: Vec<_> = listing
                .components
                .iter()
                .map(|c| json!({"identifier": c.identifier, "title": c.label()}))
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        other => bail!("Unknown format '{other}' (expected text or json)"),
    }

    Ok(())
}
