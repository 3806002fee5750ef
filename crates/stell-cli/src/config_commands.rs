//! Configuration management subcommands.

use clap::Subcommand;

/// Site configuration commands.
///
/// Values are written to the `.env` file in the data directory and picked up
/// on the next start.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the active site configuration and page registry
    Show,
    /// Set the public base URL of the site
    SetSiteUrl {
        /// Absolute http(s) URL (e.g. "https://stellmedia.com")
        url: String,
    },
    /// Set the display name of the site
    SetSiteName { name: String },
}
