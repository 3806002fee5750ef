//! Redirects command handler.

use anyhow::Result;
use stell_core::{RedirectRule, RedirectStatus, SettingKey, SettingValue};

use crate::bootstrap::CliContext;
use crate::commands::RedirectsCommand;
use crate::handlers::common::{edit_and_save, effective, print_saved};
use crate::presentation::display_reconciled;

pub async fn execute(ctx: &CliContext, command: RedirectsCommand) -> Result<()> {
    match command {
        RedirectsCommand::List => {
            display_reconciled(&effective(ctx, &SettingKey::Redirects).await?);
            Ok(())
        }
        RedirectsCommand::Add { from, to, status } => {
            let rule = RedirectRule::new(from, to, RedirectStatus::try_from(status)?);
            let record = edit_and_save(ctx, SettingKey::Redirects, |draft| {
                Ok(draft.edit_redirects(|redirects| redirects.upsert(rule))?)
            })
            .await?;
            print_saved(&record);
            Ok(())
        }
        RedirectsCommand::Remove { from } => {
            let reconciled = effective(ctx, &SettingKey::Redirects).await?;
            let exists = matches!(
                &reconciled.value,
                SettingValue::Redirects(redirects) if redirects.lookup(&from).is_some()
            );
            if !exists {
                println!("No redirect from {from}.");
                return Ok(());
            }
            let record = edit_and_save(ctx, SettingKey::Redirects, |draft| {
                Ok(draft.edit_redirects(|redirects| {
                    redirects.remove(&from);
                })?)
            })
            .await?;
            print_saved(&record);
            Ok(())
        }
    }
}
