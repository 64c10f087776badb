//! atlas-crawler CLI
//!
//! Queries FlyAtlas2 for each FlyBase gene ID and writes one wide table of
//! tissue/stage FPKM values, a list of genes that failed, and the raw atlas
//! responses.

use std::path::PathBuf;

use atlas_crawler::{
    error::Result,
    models::{Config, ParseMode},
    pipeline,
    services::{HttpFetcher, load_identifiers},
    storage::LocalStorage,
};
use clap::Parser;

/// atlas-crawler - FlyAtlas2 expression table harvester
#[derive(Parser, Debug)]
#[command(
    name = "atlas-crawler",
    version,
    about = "Collects FlyAtlas2 FPKM tables for a list of FlyBase genes"
)]
struct Cli {
    /// File of FlyBase gene IDs, one per line. Combine freely with --genes.
    #[arg(short = 'f', long = "genefile")]
    genefile: Option<PathBuf>,

    /// Comma-separated FlyBase gene IDs. Combine freely with --genefile.
    #[arg(short = 'c', long = "genes")]
    genes: Option<String>,

    /// Prefix for output files (default: myFlyAtlas2Queries). Reusing a
    /// prefix overwrites earlier output.
    #[arg(short = 'o', long = "outprefix")]
    outprefix: Option<String>,

    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(long, default_value = "atlas.toml")]
    config: PathBuf,

    /// Fail genes whose tissue rows differ from the expected set
    #[arg(long)]
    strict: bool,

    /// Process genes in sorted order for reproducible row order
    #[arg(long)]
    sorted: bool,

    /// Also write <prefix>-summary.json
    #[arg(long)]
    summary: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load the config file if present and apply command-line overrides.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = if cli.config.exists() {
        let config = Config::load(&cli.config)?;
        log::info!("Loaded configuration from {}", cli.config.display());
        config
    } else {
        log::debug!(
            "No configuration at {}, using defaults",
            cli.config.display()
        );
        Config::default()
    };

    if let Some(prefix) = &cli.outprefix {
        config.output.prefix = prefix.clone();
    }
    if cli.strict {
        config.parsing.mode = ParseMode::Strict;
    }
    if cli.sorted {
        config.output.sort_identifiers = true;
    }
    if cli.summary {
        config.output.write_summary = true;
    }

    Ok(config)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;

    if cli.validate {
        return pipeline::run_validate(&config);
    }
    config.validate()?;

    if cli.genefile.is_none() && cli.genes.is_none() {
        log::warn!("Neither --genefile nor --genes given; nothing to query");
    }
    let identifiers = load_identifiers(cli.genefile.as_deref(), cli.genes.as_deref())?;
    log::info!("Loaded {} unique gene IDs", identifiers.len());

    let fetcher = HttpFetcher::from_config(&config.atlas)?;
    let storage = LocalStorage::new(&config.output.prefix).with_summary(config.output.write_summary);

    let report = pipeline::run_harvest(&config, identifiers, &fetcher, &storage).await?;
    if report.write.error_count > 0 {
        log::warn!(
            "{} genes could not be resolved; see {}",
            report.write.error_count,
            report.write.errors_location
        );
    }

    log::info!("Done!");

    Ok(())
}
