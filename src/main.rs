//! rrweight - weighted round-robin simulator
//!
//! Usage:
//!     rrweight --config <path>
//!
//! See --help for more options.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use rrweight::config::load_config;
use rrweight::simulate::Pool;
use rrweight::util::init_logging;

/// Run weighted round-robin pools and print their selection sequences.
#[derive(Parser, Debug)]
#[command(name = "rrweight")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,

    /// Only run the named pool
    #[arg(short, long, value_name = "NAME")]
    pool: Option<String>,

    /// Override the number of rounds for every pool
    #[arg(short, long, value_name = "N")]
    rounds: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config).with_context(|| {
        format!(
            "failed to load configuration from '{}'",
            cli.config.display()
        )
    })?;

    // CLI overrides config
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.global.log_level);

    init_logging(log_level, &config.global.log_format);

    if cli.validate {
        info!("Configuration is valid");
        println!("Configuration is valid.");
        println!("  Pools: {}", config.pools.len());
        for pool in &config.pools {
            println!(
                "    - {} [{}] {} targets, {} rounds",
                pool.name,
                pool.algorithm,
                pool.targets.len(),
                pool.rounds
            );
        }
        return Ok(());
    }

    if cli.rounds == Some(0) {
        bail!("--rounds must be at least 1");
    }

    let pools: Vec<_> = config
        .pools
        .iter()
        .filter(|p| cli.pool.as_deref().is_none_or(|name| p.name == name))
        .collect();

    if pools.is_empty() {
        if let Some(name) = &cli.pool {
            bail!("no pool named '{name}' in configuration");
        }
    }

    info!(
        config_path = %cli.config.display(),
        pools = pools.len(),
        "rrweight starting"
    );

    for pool_config in pools {
        let mut pool = Pool::from_config(pool_config);
        let rounds = cli.rounds.unwrap_or(pool.rounds());
        let report = pool.run(rounds);

        info!(
            pool = %report.pool,
            algorithm = %report.algorithm,
            rounds,
            misses = report.misses(),
            "pool finished"
        );
        println!("{report}");
    }

    Ok(())
}
