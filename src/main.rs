//! Main entry point for the netblock-tsv CLI tool

use anyhow::Context;
use clap::Parser;
use log::info;
use netblock_tsv::cli::Cli;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still takes precedence
    let default_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    info!("Starting netblock-tsv v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = cli.load_config().context("loading configuration")?;
    cli.apply(&mut config);

    if let Some(summary) = cli.run(&config).context("processing registry dumps")? {
        info!(
            "script finished: {} records from {} files",
            summary.records, summary.files_processed
        );
    }

    Ok(())
}
