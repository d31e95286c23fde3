//! apriori-miner - frequent itemsets and association rules from a basket CSV

use std::path::PathBuf;

use anyhow::{Context, Result};
use apriori::{
    generate_frequent_itemsets, generate_rules, load_baskets, save_report, MiningConfig, Report,
    ReportFormat,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Apriori miner CLI
#[derive(Parser)]
#[command(name = "apriori-miner")]
#[command(
    about = "Mine frequent itemsets and association rules from a basket CSV",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// CSV file with one basket per row
    dataset: PathBuf,

    /// Minimum support, a fraction in (0, 1]
    min_support: f64,

    /// Minimum confidence, a fraction in (0, 1]
    min_confidence: f64,

    /// Report path
    #[arg(short, long, env = "APRIORI_OUTPUT", default_value = "output.txt")]
    output: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, env = "APRIORI_FORMAT", default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Largest itemset size to mine
    #[arg(long, env = "APRIORI_MAX_LEN")]
    max_len: Option<usize>,

    /// Log level
    #[arg(long, env = "APRIORI_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "APRIORI_LOG_JSON")]
    json_logs: bool,
}

fn init_tracing(cli: &Cli) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = MiningConfig::new(cli.min_support, cli.min_confidence)
        .context("invalid thresholds")?;
    if let Some(max_len) = cli.max_len {
        config = config.with_max_len(max_len)?;
    }

    info!(path = %cli.dataset.display(), "Loading dataset");
    let baskets = load_baskets(&cli.dataset)
        .with_context(|| format!("failed to load baskets from {}", cli.dataset.display()))?;

    info!(baskets = baskets.len(), "Running Apriori");
    let table = generate_frequent_itemsets(&baskets, &config)
        .context("frequent itemset mining failed")?;

    info!(itemsets = table.len(), "Generating rules");
    let rules = generate_rules(&table, config.min_confidence)?;

    info!(rules = rules.len(), output = %cli.output.display(), "Writing output");
    let report = Report::new(&table, rules, &config);
    save_report(&cli.output, &report, cli.format)
        .with_context(|| format!("failed to write report to {}", cli.output.display()))?;

    info!("Done");
    Ok(())
}
