//! winepress - Main Entry Point

use clap::Parser;
use winepress::cli::{print_summary, Cli};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "winepress=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.into_config();

    let summary = winepress::run::execute(&config)?;
    print_summary(&summary);

    Ok(())
}
