// src/symbol_manager_pool.rs

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use polars::prelude::*;

use crate::error::Result;
use crate::intraday_extractor::MonthFetcher;
use crate::intraday_info::IntradayInfo;
use crate::symbol_manager::SymbolManager;

/// Runs the symbol managers one after another. Each symbol owns its own
/// year pool; a failed symbol is logged and skipped, never written.
pub struct SymbolManagerPool<F: MonthFetcher> {
    managers: Vec<SymbolManager<F>>,
}

impl<F: MonthFetcher> SymbolManagerPool<F> {
    pub fn new(fetcher: F, infos: Vec<IntradayInfo>, threads: usize) -> Self {
        let fetcher = Arc::new(fetcher);
        let managers = infos
            .into_iter()
            .map(|info| SymbolManager::new(Arc::clone(&fetcher), info, threads))
            .collect();
        SymbolManagerPool { managers }
    }

    pub async fn run(&self, output_dir: &Path) {
        for manager in &self.managers {
            let symbol = manager.symbol();
            match manager.collect().await {
                Ok(mut df) => match Self::write_symbol(output_dir, symbol, &mut df) {
                    Ok(rows) => info!("[{symbol}] wrote {rows} rows"),
                    Err(err) => error!("[{symbol}] failed to write output: {err}"),
                },
                Err(err) => error!("[{symbol}] collection failed: {err}"),
            }
        }
    }

    fn write_symbol(output_dir: &Path, symbol: &str, df: &mut DataFrame) -> Result<usize> {
        let path = output_dir.join(format!("{symbol}.csv"));
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
        Ok(df.height())
    }
}
