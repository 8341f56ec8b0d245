mod config;

use anyhow::{Context, Result};
use clap::Parser;
use localtrade_engine::execute;
use localtrade_io::{load_dataset, write_report_file};

use crate::config::{Args, Config};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(err) => err.exit(),
    };
    run(&config)?;

    println!("Done. Output in: {}", config.result_file.display());
    Ok(())
}

fn run(config: &Config) -> Result<()> {
    log::info!(
        "region {} orders in [{}, {}) with {} threads",
        config.query.region,
        config.query.window.from,
        config.query.window.to,
        config.threads
    );

    let tables = load_dataset(&config.data_dir, &config.load).with_context(|| {
        format!("failed to load tables from {}", config.data_dir.display())
    })?;

    let outcome =
        execute(&tables, &config.query, config.threads).context("failed to run the query")?;

    write_report_file(&config.result_file, config.format, &config.query, &outcome)
        .with_context(|| format!("failed to write {}", config.result_file.display()))?;
    Ok(())
}
