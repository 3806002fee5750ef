//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to `AppCore`.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use stell_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};
use stell_core::paths::env_file_path;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment overrides before clap reads STELL_* variables.
    if let Ok(env_file) = env_file_path() {
        dotenvy::from_path(&env_file).ok();
    }
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(u8::try_from(exit_code_for(&e)).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Paths does not need a store.
    if matches!(command, Commands::Paths) {
        return handlers::paths::execute(&config);
    }

    let ctx = bootstrap(config.clone()).await?;

    match command {
        Commands::Settings { command } => handlers::settings::execute(&ctx, command).await,
        Commands::Seo { command } => handlers::seo::execute(&ctx, command).await,
        Commands::Sitemap { command } => handlers::sitemap::execute(&ctx, command).await,
        Commands::Robots { command } => handlers::robots::execute(&ctx, command).await,
        Commands::Redirects { command } => handlers::redirects::execute(&ctx, command).await,
        Commands::Audit { json, strict } => handlers::audit::execute(&ctx, json, strict).await,
        Commands::Session { key } => handlers::session::execute(&ctx, key).await,
        Commands::Config { command } => handlers::config::execute(&ctx, command),
        Commands::Paths => handlers::paths::execute(&config),
    }
}
