//! Main commands enum and per-setting subcommands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config_commands::ConfigCommand;

/// Available commands.
///
/// Each editing command opens the record it targets, applies the change to
/// a draft and saves it through the Save Gate.
#[derive(Subcommand)]
pub enum Commands {
    /// List, show or delete stored settings records
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Edit per-page SEO metadata
    Seo {
        #[command(subcommand)]
        command: SeoCommand,
    },

    /// Edit, import or export the sitemap
    Sitemap {
        #[command(subcommand)]
        command: SitemapCommand,
    },

    /// Replace or export robots.txt
    Robots {
        #[command(subcommand)]
        command: RobotsCommand,
    },

    /// Manage redirect rules
    Redirects {
        #[command(subcommand)]
        command: RedirectsCommand,
    },

    /// Check sitemap, robots.txt, redirects and page SEO for problems
    Audit {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Exit with an error when the report contains errors
        #[arg(long)]
        strict: bool,
    },

    /// Interactive editing session
    Session {
        /// Setting key to open right away (e.g. "sitemap", "seo:/about")
        key: Option<String>,
    },

    /// View or change site configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show resolved data paths
    Paths,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// List stored records
    List,
    /// Show the effective value of a setting and where it came from
    Show {
        /// Setting key (e.g. "robots", "seo:/about", "content:/")
        key: String,
    },
    /// Delete a stored record so the setting falls back to its defaults
    Delete {
        key: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SeoCommand {
    /// Show the effective SEO for a page
    Show {
        /// Page path (e.g. "/about")
        path: String,
    },
    /// Update SEO fields for a page; omitted fields keep their value
    Set {
        /// Page path (e.g. "/about")
        path: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        canonical: Option<String>,
        /// Comma-separated keywords
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long)]
        og_image: Option<String>,
        /// Ask crawlers not to index the page
        #[arg(long)]
        noindex: Option<bool>,
        /// Ask crawlers not to follow links on the page
        #[arg(long)]
        nofollow: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum SitemapCommand {
    /// List sitemap entries
    Show,
    /// Replace the sitemap with the entries of an XML file
    Import {
        /// Path to a sitemap.xml file
        file: PathBuf,
    },
    /// Write the sitemap as XML
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Add an entry or replace the entry with the same loc
    Add {
        /// Absolute URL of the page
        loc: String,
        /// always, hourly, daily, weekly, monthly, yearly or never
        #[arg(long)]
        changefreq: Option<String>,
        /// 0.0 to 1.0
        #[arg(long)]
        priority: Option<f32>,
        /// Last modification date (YYYY-MM-DD)
        #[arg(long)]
        lastmod: Option<String>,
    },
    /// Remove the entry for a loc
    Remove { loc: String },
}

#[derive(Subcommand)]
pub enum RobotsCommand {
    /// Print the effective robots.txt
    Show,
    /// Replace robots.txt with the contents of a file
    Set { file: PathBuf },
    /// Write robots.txt
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum RedirectsCommand {
    /// List redirect rules
    List,
    /// Add a rule or replace the rule with the same source
    Add {
        /// Source path (e.g. "/old-services")
        from: String,
        /// Target path or absolute URL
        to: String,
        /// HTTP status: 301, 302, 307 or 308
        #[arg(long, default_value_t = 301)]
        status: u16,
    },
    /// Remove the rule for a source path
    Remove { from: String },
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use clap::Parser;

    use super::*;

    #[test]
    fn test_seo_set_parses_optional_flags() {
        let cli = Cli::parse_from([
            "stell",
            "seo",
            "set",
            "/about",
            "--canonical",
            "https://stellmedia.com/about-us",
            "--noindex",
            "false",
        ]);
        let Some(Commands::Seo {
            command:
                SeoCommand::Set {
                    path,
                    title,
                    canonical,
                    noindex,
                    ..
                },
        }) = cli.command
        else {
            panic!("expected seo set");
        };
        assert_eq!(path, "/about");
        assert!(title.is_none());
        assert_eq!(canonical.as_deref(), Some("https://stellmedia.com/about-us"));
        assert_eq!(noindex, Some(false));
    }

    #[test]
    fn test_redirect_status_defaults_to_301() {
        let cli = Cli::parse_from(["stell", "redirects", "add", "/old", "/new"]);
        let Some(Commands::Redirects {
            command: RedirectsCommand::Add { status, .. },
        }) = cli.command
        else {
            panic!("expected redirects add");
        };
        assert_eq!(status, 301);
    }

    #[test]
    fn test_session_key_is_optional() {
        let cli = Cli::parse_from(["stell", "session"]);
        assert!(matches!(cli.command, Some(Commands::Session { key: None })));
    }
}
