// src/dataset_generator.rs

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;
use rand::Rng;
use tokio::time::{sleep, Duration};

use crate::cleaner::{CacheCodec, Cleaner};
use crate::config::{TICKER_DELAY_MAX_SECS, TICKER_DELAY_MIN_SECS};
use crate::error::Result;
use crate::window_extractor::{MinuteFetcher, WindowExtractor};

/// Reads the ticker universe from the `Symbol` column of a market-info table.
pub fn load_tickers(market_info: &Path) -> Result<Vec<String>> {
    let df = CsvReader::from_path(market_info)?
        .has_header(true)
        .finish()?;
    let symbols = df.column("Symbol")?.str()?;
    Ok(symbols.into_iter().flatten().map(String::from).collect())
}

/// Sequentially assembles the rolling dataset for every ticker: fetch the
/// trailing window, pass it through the cache shape, clean it, write one CSV
/// per ticker, and sleep a little in between.
pub struct DatasetGenerator<F: MinuteFetcher> {
    extractor: WindowExtractor<F>,
    cache_dir: PathBuf,
    output_dir: PathBuf,
}

impl<F: MinuteFetcher> DatasetGenerator<F> {
    pub fn new(fetcher: F, cache_dir: PathBuf, output_dir: PathBuf) -> Self {
        DatasetGenerator {
            extractor: WindowExtractor::new(fetcher),
            cache_dir,
            output_dir,
        }
    }

    pub async fn run(&self, tickers: &[String], date: NaiveDate) -> Result<()> {
        let cache_path = self.cache_dir.join("cache.csv");

        for ticker in tickers {
            println!("Processing {ticker}...");

            let Some(raw) = self.extractor.fetch_window(ticker, date).await? else {
                println!("[{ticker}] No data on {date}");
                continue;
            };
            if raw.is_empty() {
                println!("[{ticker}] Empty data on {date}");
                continue;
            }

            CacheCodec::write(&cache_path, &raw, ticker)?;
            let cached = CacheCodec::read(&cache_path)?;
            let mut cleaned = Cleaner::clean(&cached)?;

            let output_path = self.output_dir.join(format!("{ticker}.csv"));
            let mut file = File::create(output_path)?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut cleaned)?;

            let wait_time = {
                let mut rng = rand::thread_rng();
                rng.gen_range(TICKER_DELAY_MIN_SECS..TICKER_DELAY_MAX_SECS)
            };
            println!("Waiting for {wait_time:.2} seconds...");
            sleep(Duration::from_secs_f64(wait_time)).await;
        }
        Ok(())
    }
}
