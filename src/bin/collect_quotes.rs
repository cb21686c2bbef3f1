// src/bin/collect_quotes.rs

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use quotecollect::config::DEFAULT_POOL_WIDTH;
use quotecollect::{AlphaVantageFetcher, IntradayInfo, SymbolManagerPool};

#[derive(Parser)]
#[command(
    name = "collect_quotes",
    about = "Collect 1-minute quotes from the US stock market."
)]
struct Args {
    /// Comma-separated symbols, e.g. AAPL,MSFT.
    #[arg(short, long, value_delimiter = ',', required = true)]
    symbols: Vec<String>,

    /// Vendor API key.
    #[arg(short, long = "api_key")]
    api_key: String,

    /// Output directory; one `{symbol}.csv` per symbol.
    #[arg(short, long)]
    output: PathBuf,

    /// First year to collect.
    #[arg(short, long)]
    begin: i32,

    /// One past the last year to collect.
    #[arg(short, long)]
    end: i32,

    /// Concurrent year fetches per symbol.
    #[arg(short, long, default_value_t = DEFAULT_POOL_WIDTH)]
    threads: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    fs::create_dir_all(&args.output)?;

    let infos = IntradayInfo::create_infos(args.symbols, args.begin, args.end);
    let pool = SymbolManagerPool::new(AlphaVantageFetcher::new(args.api_key), infos, args.threads);
    pool.run(&args.output).await;

    Ok(())
}
