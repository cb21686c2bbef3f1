// tests/dataset_generator_tests.rs

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use polars::prelude::*;
use quotecollect::{load_tickers, DatasetGenerator, MinuteFetcher};

fn day_frame(date: NaiveDate) -> DataFrame {
    DataFrame::new(vec![
        Series::new("Datetime", vec![format!("{date} 09:30:00-04:00")]),
        Series::new("Adj Close", vec![10.0]),
        Series::new("Close", vec![10.0]),
        Series::new("High", vec![10.5]),
        Series::new("Low", vec![9.5]),
        Series::new("Open", vec![9.8]),
        Series::new("Volume", vec![1000i64]),
    ])
    .unwrap()
}

struct FakeMinuteFetcher {
    empty_ticker: Option<String>,
}

#[async_trait]
impl MinuteFetcher for FakeMinuteFetcher {
    async fn fetch_minutes(
        &self,
        ticker: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> quotecollect::Result<DataFrame> {
        if self.empty_ticker.as_deref() == Some(ticker) {
            return Ok(DataFrame::default());
        }
        Ok(day_frame(start))
    }
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quotecollect_{tag}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_run_writes_cleaned_csv_per_ticker() {
    let cache_dir = scratch_dir("gen_cache");
    let output_dir = scratch_dir("gen_output");
    let generator = DatasetGenerator::new(
        FakeMinuteFetcher { empty_ticker: None },
        cache_dir.clone(),
        output_dir.clone(),
    );

    let anchor = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    generator
        .run(&["XYZ".to_string()], anchor)
        .await
        .unwrap();

    assert!(cache_dir.join("cache.csv").exists());

    let output_path = output_dir.join("XYZ.csv");
    assert!(output_path.exists());

    let contents = std::fs::read_to_string(&output_path).unwrap();
    let header = contents.lines().next().unwrap();
    assert_eq!(header, "datetime,adj_close,close,high,low,open,volume");
    // One row per weekday in the window; the preamble rows must be gone.
    assert!(!contents.contains("Ticker"));
    assert!(contents.contains("2024-03-15 09:30:00-04:00"));
}

#[tokio::test]
async fn test_run_skips_tickers_without_data() {
    let cache_dir = scratch_dir("skip_cache");
    let output_dir = scratch_dir("skip_output");
    let generator = DatasetGenerator::new(
        FakeMinuteFetcher {
            empty_ticker: Some("ZZZ".to_string()),
        },
        cache_dir,
        output_dir.clone(),
    );

    let anchor = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    generator
        .run(&["ZZZ".to_string(), "XYZ".to_string()], anchor)
        .await
        .unwrap();

    // The empty ticker produces no file, and the run still reaches the next
    // ticker.
    assert!(!output_dir.join("ZZZ.csv").exists());
    assert!(output_dir.join("XYZ.csv").exists());
}

#[test]
fn test_load_tickers_reads_symbol_column() {
    let dir = scratch_dir("market_info");
    let path = dir.join("market_info.csv");
    std::fs::write(&path, "Symbol,Name\nAAA,Alpha Corp\nBBB,Beta Inc\n").unwrap();

    let tickers = load_tickers(&path).unwrap();
    assert_eq!(tickers, vec!["AAA".to_string(), "BBB".to_string()]);
}
