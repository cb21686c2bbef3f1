// src/cleaner.rs

use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::*;

use crate::error::{CollectError, Result};

/// Column names of a cleaned dataset, in output order.
pub const CLEAN_COLUMNS: [&str; 7] = [
    "datetime",
    "adj_close",
    "close",
    "high",
    "low",
    "open",
    "volume",
];

/// On-disk cache shape for a raw window: a `Price` header line naming the
/// value columns, a `Ticker` line, a `Datetime` line, then the data rows
/// with the timestamp in the first field. Reading the file back yields a
/// headered all-string table whose first two rows are preamble.
pub struct CacheCodec;

impl CacheCodec {
    pub fn write(path: &Path, df: &DataFrame, ticker: &str) -> Result<()> {
        let names = df.get_column_names();
        if names.len() < 2 {
            return Err(CollectError::Shape(
                "cache table has no value columns".into(),
            ));
        }
        let value_names = &names[1..];

        let mut file = File::create(path)?;
        writeln!(file, "Price,{}", value_names.join(","))?;
        writeln!(file, "Ticker,{}", vec![ticker; value_names.len()].join(","))?;
        writeln!(file, "Datetime{}", ",".repeat(value_names.len()))?;

        let mut body = df.clone();
        CsvWriter::new(&mut file)
            .include_header(false)
            .finish(&mut body)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<DataFrame> {
        let df = CsvReader::from_path(path)?
            .has_header(true)
            .infer_schema(Some(0))
            .finish()?;
        Ok(df)
    }
}

/// Strips the serialization preamble and fixes the column schema.
pub struct Cleaner;

impl Cleaner {
    /// Drops the first two rows (the `Ticker`/`Datetime` preamble carried in
    /// from the cache shape) and renames the seven columns positionally.
    pub fn clean(df: &DataFrame) -> Result<DataFrame> {
        if df.width() != CLEAN_COLUMNS.len() {
            return Err(CollectError::Shape(format!(
                "expected {} columns in a raw window table, found {}",
                CLEAN_COLUMNS.len(),
                df.width()
            )));
        }
        let mut fixed = df.slice(2, df.height().saturating_sub(2));
        fixed.set_column_names(&CLEAN_COLUMNS)?;
        Ok(fixed)
    }
}
