// src/bin/generate_raw_dataset.rs

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use quotecollect::{load_tickers, DatasetGenerator, YahooFetcher};

#[derive(Parser)]
#[command(
    name = "generate_raw_dataset",
    about = "Generate a raw minute-quote dataset for a given set of tickers."
)]
struct Args {
    /// Market-info table with a `Symbol` column.
    #[arg(long = "market_info")]
    market_info: PathBuf,

    /// Scratch directory for the transient cache file.
    #[arg(short, long)]
    cache: PathBuf,

    /// Output directory; one `{ticker}.csv` per ticker with data.
    #[arg(short, long)]
    output: PathBuf,

    /// Anchor date (YYYY-MM-DD); the window covers the trailing 30 days.
    #[arg(short, long)]
    date: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    fs::create_dir_all(&args.output)?;
    fs::create_dir_all(&args.cache)?;

    let date = NaiveDate::parse_from_str(&args.date, "%Y-%m-%d")
        .with_context(|| format!("invalid anchor date: {}", args.date))?;

    let tickers = load_tickers(&args.market_info)?;
    let generator = DatasetGenerator::new(YahooFetcher::new(), args.cache, args.output);
    generator.run(&tickers, date).await?;

    Ok(())
}
