//! robots.txt command handler.

use std::path::Path;

use anyhow::Result;
use stell_core::{SettingKey, export_value, parse_robots};

use crate::bootstrap::CliContext;
use crate::commands::RobotsCommand;
use crate::handlers::common::{
    edit_and_save, effective, print_saved, read_input_file, write_export,
};
use crate::presentation::display_reconciled;

pub async fn execute(ctx: &CliContext, command: RobotsCommand) -> Result<()> {
    match command {
        RobotsCommand::Show => {
            display_reconciled(&effective(ctx, &SettingKey::Robots).await?);
            Ok(())
        }
        RobotsCommand::Set { file } => set(ctx, &file).await,
        RobotsCommand::Export { out } => {
            let reconciled = effective(ctx, &SettingKey::Robots).await?;
            let file = export_value(&reconciled.key, &reconciled.value)?;
            write_export(&file, out.as_deref())
        }
    }
}

async fn set(ctx: &CliContext, file: &Path) -> Result<()> {
    let text = read_input_file(file)?;
    // Fail before opening a draft so the message points at the file.
    let document = parse_robots(&text)?;
    tracing::debug!(groups = document.groups.len(), "Parsed robots.txt");

    let record =
        edit_and_save(ctx, SettingKey::Robots, |draft| Ok(draft.set_robots(text)?)).await?;
    print_saved(&record);
    Ok(())
}
