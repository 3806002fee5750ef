//! Settings command handler.
//!
//! Lists stored records, shows effective values and deletes records.

use anyhow::Result;
use stell_core::SettingKey;

use crate::bootstrap::CliContext;
use crate::commands::SettingsCommand;
use crate::handlers::common::effective;
use crate::presentation::{display_reconciled, print_separator};
use crate::utils::input;

pub async fn execute(ctx: &CliContext, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::List => list(ctx).await,
        SettingsCommand::Show { key } => show(ctx, &key.parse()?).await,
        SettingsCommand::Delete { key, force } => delete(ctx, &key.parse()?, force).await,
    }
}

async fn list(ctx: &CliContext) -> Result<()> {
    let records = ctx.app().settings().list().await?;
    if records.is_empty() {
        println!("No settings stored. Every setting uses its defaults.");
        return Ok(());
    }

    println!("{:<28} {:<14} UPDATED", "KEY", "KIND");
    print_separator(66);
    for record in &records {
        println!(
            "{:<28} {:<14} {}",
            record.key.to_string(),
            record.key.kind().as_str(),
            record.updated_at.format("%Y-%m-%d %H:%M UTC")
        );
    }
    println!("{} stored", records.len());
    Ok(())
}

/// Print the effective value of `key` with its source.
pub async fn show(ctx: &CliContext, key: &SettingKey) -> Result<()> {
    let reconciled = effective(ctx, key).await?;
    display_reconciled(&reconciled);
    Ok(())
}

async fn delete(ctx: &CliContext, key: &SettingKey, force: bool) -> Result<()> {
    if !force {
        let confirm = input::prompt_confirmation(&format!(
            "Delete the stored value of {key}? It will fall back to its defaults."
        ))?;
        if !confirm {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    if ctx.app().settings().delete(key).await? {
        let reconciled = effective(ctx, key).await?;
        println!(
            "✓ Deleted {key}. Now using the {} value.",
            reconciled.source.label()
        );
    } else {
        println!("Nothing stored for {key}.");
    }
    Ok(())
}
