// tests/cleaner_tests.rs

use std::path::PathBuf;

use polars::prelude::*;
use quotecollect::cleaner::CLEAN_COLUMNS;
use quotecollect::{CacheCodec, Cleaner};

fn raw_window(rows: usize) -> DataFrame {
    let datetimes: Vec<String> = (0..rows)
        .map(|row| format!("2024-03-{:02} 09:30:00-04:00", 13 + row))
        .collect();
    let prices: Vec<f64> = (0..rows).map(|row| 10.0 + row as f64).collect();
    let volumes: Vec<i64> = (0..rows).map(|row| 1000 + row as i64).collect();
    DataFrame::new(vec![
        Series::new("Datetime", datetimes),
        Series::new("Adj Close", prices.clone()),
        Series::new("Close", prices.clone()),
        Series::new("High", prices.clone()),
        Series::new("Low", prices.clone()),
        Series::new("Open", prices),
        Series::new("Volume", volumes),
    ])
    .unwrap()
}

fn scratch_file(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quotecollect_{tag}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join("cache.csv")
}

#[test]
fn test_cache_round_trip_carries_two_preamble_rows() {
    let path = scratch_file("roundtrip");
    CacheCodec::write(&path, &raw_window(3), "XYZ").unwrap();

    let cached = CacheCodec::read(&path).unwrap();
    assert_eq!(cached.height(), 5);
    assert_eq!(cached.width(), 7);

    let names = cached.get_column_names();
    assert_eq!(names[0], "Price");
    assert_eq!(names[1], "Adj Close");

    let first = cached.column("Price").unwrap().str().unwrap();
    assert_eq!(first.get(0).unwrap(), "Ticker");
    assert_eq!(first.get(1).unwrap(), "Datetime");
    assert_eq!(first.get(2).unwrap(), "2024-03-13 09:30:00-04:00");

    let adj = cached.column("Adj Close").unwrap().str().unwrap();
    assert_eq!(adj.get(0).unwrap(), "XYZ");
    assert!(adj.get(1).is_none());
}

#[test]
fn test_clean_drops_preamble_and_renames_columns() {
    let path = scratch_file("clean");
    CacheCodec::write(&path, &raw_window(3), "XYZ").unwrap();
    let cached = CacheCodec::read(&path).unwrap();

    let cleaned = Cleaner::clean(&cached).unwrap();
    assert_eq!(cleaned.height(), 3);
    assert_eq!(cleaned.get_column_names(), CLEAN_COLUMNS);

    let datetimes = cleaned.column("datetime").unwrap().str().unwrap();
    assert_eq!(datetimes.get(0).unwrap(), "2024-03-13 09:30:00-04:00");
    assert_eq!(datetimes.get(2).unwrap(), "2024-03-15 09:30:00-04:00");
}

#[test]
fn test_clean_on_preamble_only_yields_empty_table() {
    let path = scratch_file("empty");
    CacheCodec::write(&path, &raw_window(0), "XYZ").unwrap();
    let cached = CacheCodec::read(&path).unwrap();
    assert_eq!(cached.height(), 2);

    let cleaned = Cleaner::clean(&cached).unwrap();
    assert_eq!(cleaned.height(), 0);
    assert_eq!(cleaned.get_column_names(), CLEAN_COLUMNS);
}

#[test]
fn test_clean_requires_seven_columns() {
    let narrow = DataFrame::new(vec![
        Series::new("a", vec!["x"]),
        Series::new("b", vec!["y"]),
    ])
    .unwrap();
    assert!(Cleaner::clean(&narrow).is_err());
}
