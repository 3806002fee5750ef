//! Config command handler.
//!
//! Site URL and name live in the `.env` file of the data directory.

use anyhow::Result;
use stell_core::paths::{env_file_path, persist_site_name, persist_site_url};
use stell_core::validation::parse_absolute_url;

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;
use crate::presentation::{print_separator, truncate_string};

pub fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            show(ctx);
            Ok(())
        }
        ConfigCommand::SetSiteUrl { url } => {
            let url = normalize_site_url(&url)?;
            persist_site_url(&url)?;
            println!("✓ Site URL set to {url} (takes effect on the next run)");
            Ok(())
        }
        ConfigCommand::SetSiteName { name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(CliError::Arguments("site name cannot be empty".into()).into());
            }
            persist_site_name(name)?;
            println!("✓ Site name set to {name} (takes effect on the next run)");
            Ok(())
        }
    }
}

fn show(ctx: &CliContext) {
    let site = ctx.app().site();
    println!("Site configuration:");
    println!("  site_url:  {}", site.base_url);
    println!("  site_name: {}", site.site_name);
    match env_file_path() {
        Ok(path) => println!("  env_file:  {}", path.display()),
        Err(e) => println!("  env_file:  unavailable ({e})"),
    }
    println!();
    println!("{:<18} {:<26} {:<8} PRIORITY", "PATH", "TITLE", "FREQ");
    print_separator(62);
    for page in &site.pages {
        println!(
            "{:<18} {:<26} {:<8} {:.1}",
            page.path.to_string(),
            truncate_string(&page.title, 26),
            page.changefreq.as_str(),
            page.priority,
        );
    }
}

/// Validate a site URL and drop the trailing slash.
pub(crate) fn normalize_site_url(raw: &str) -> Result<String> {
    let url = parse_absolute_url("site URL", raw.trim())?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}
