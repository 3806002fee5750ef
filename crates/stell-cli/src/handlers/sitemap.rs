//! Sitemap command handler.
//!
//! Import replaces the whole sitemap; a malformed document is rejected
//! before anything is changed.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use stell_core::{
    ChangeFreq, FixedConfirmation, SettingKey, SettingValue, SitemapUrl, export_value,
};

use crate::bootstrap::CliContext;
use crate::commands::SitemapCommand;
use crate::handlers::common::{
    edit_and_save, effective, print_saved, read_input_file, write_export,
};
use crate::presentation::display_reconciled;

pub async fn execute(ctx: &CliContext, command: SitemapCommand) -> Result<()> {
    match command {
        SitemapCommand::Show => {
            display_reconciled(&effective(ctx, &SettingKey::Sitemap).await?);
            Ok(())
        }
        SitemapCommand::Import { file } => import(ctx, &file).await,
        SitemapCommand::Export { out } => export(ctx, out.as_deref()).await,
        SitemapCommand::Add {
            loc,
            changefreq,
            priority,
            lastmod,
        } => {
            let url = build_url(loc, changefreq.as_deref(), priority, lastmod.as_deref())?;
            let record = edit_and_save(ctx, SettingKey::Sitemap, |draft| {
                Ok(draft.edit_sitemap(|sitemap| sitemap.upsert(url))?)
            })
            .await?;
            print_saved(&record);
            Ok(())
        }
        SitemapCommand::Remove { loc } => remove(ctx, &loc).await,
    }
}

async fn import(ctx: &CliContext, file: &Path) -> Result<()> {
    let xml = read_input_file(file)?;
    let mut editor = ctx.editor(Arc::new(FixedConfirmation(true)));
    editor.open(SettingKey::Sitemap).await?;
    let count = editor
        .import_sitemap_xml(&xml)
        .with_context(|| format!("{} was not imported", file.display()))?;
    let record = editor.save().await?;
    println!("✓ Imported {count} entries from {}", file.display());
    print_saved(&record);
    Ok(())
}

async fn export(ctx: &CliContext, out: Option<&Path>) -> Result<()> {
    let reconciled = effective(ctx, &SettingKey::Sitemap).await?;
    let file = export_value(&reconciled.key, &reconciled.value)?;
    write_export(&file, out)
}

async fn remove(ctx: &CliContext, loc: &str) -> Result<()> {
    let reconciled = effective(ctx, &SettingKey::Sitemap).await?;
    let listed = match &reconciled.value {
        SettingValue::Sitemap(sitemap) => sitemap.contains(loc),
        _ => false,
    };
    if !listed {
        println!("{loc} is not in the sitemap.");
        return Ok(());
    }
    let record = edit_and_save(ctx, SettingKey::Sitemap, |draft| {
        Ok(draft.edit_sitemap(|sitemap| {
            sitemap.remove(loc);
        })?)
    })
    .await?;
    print_saved(&record);
    Ok(())
}

/// Build a sitemap entry from command-line values.
pub(crate) fn build_url(
    loc: String,
    changefreq: Option<&str>,
    priority: Option<f32>,
    lastmod: Option<&str>,
) -> Result<SitemapUrl> {
    let mut url = SitemapUrl::new(loc);
    if let Some(raw) = changefreq {
        url = url.with_changefreq(raw.parse::<ChangeFreq>()?);
    }
    if let Some(priority) = priority {
        url = url.with_priority(priority);
    }
    if let Some(raw) = lastmod {
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("lastmod must be YYYY-MM-DD, got '{raw}'"))?;
        url = url.with_lastmod(date);
    }
    Ok(url)
}
