//! SEO command handler.

use anyhow::Result;
use stell_core::{SeoUpdate, SettingKey};

use crate::bootstrap::CliContext;
use crate::commands::SeoCommand;
use crate::error::CliError;
use crate::handlers::common::{edit_and_save, print_saved};
use crate::handlers::settings;

pub async fn execute(ctx: &CliContext, command: SeoCommand) -> Result<()> {
    match command {
        SeoCommand::Show { path } => settings::show(ctx, &SettingKey::page_seo(&path)?).await,
        SeoCommand::Set {
            path,
            title,
            description,
            canonical,
            keywords,
            og_image,
            noindex,
            nofollow,
        } => {
            let update = SeoUpdate {
                title,
                description,
                canonical,
                keywords: keywords.as_deref().map(split_keywords),
                og_image: og_image.map(|image| Some(image).filter(|i| !i.trim().is_empty())),
                noindex,
                nofollow,
                ..Default::default()
            };
            set(ctx, &path, &update).await
        }
    }
}

async fn set(ctx: &CliContext, path: &str, update: &SeoUpdate) -> Result<()> {
    if update.is_empty() {
        return Err(CliError::Arguments("nothing to change; pass at least one field".into()).into());
    }
    let key = SettingKey::page_seo(path)?;
    let record = edit_and_save(ctx, key, |draft| Ok(draft.edit_seo(update)?)).await?;
    print_saved(&record);
    Ok(())
}

/// Split a comma-separated keyword list, dropping empty items.
pub(crate) fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
