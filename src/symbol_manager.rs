// src/symbol_manager.rs

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use polars::prelude::*;

use crate::error::{CollectError, Result};
use crate::intraday_extractor::{FrameBuilder, IntradayExtractor, MonthFetcher};
use crate::intraday_info::IntradayInfo;

/// Collects the full year range for one symbol. Years fan out over a
/// bounded pool; the pool's lifetime is the symbol's year range.
pub struct SymbolManager<F: MonthFetcher> {
    extractor: IntradayExtractor<F>,
    threads: usize,
}

impl<F: MonthFetcher> SymbolManager<F> {
    pub fn new(fetcher: Arc<F>, info: IntradayInfo, threads: usize) -> Self {
        SymbolManager {
            extractor: IntradayExtractor { fetcher, info },
            threads,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.extractor.info.symbol
    }

    /// Year tables are accumulated in completion order as tasks finish, then
    /// the combined table is sorted chronologically before being handed back.
    pub async fn collect(&self) -> Result<DataFrame> {
        let year_futures: Vec<_> = self
            .extractor
            .info
            .years()
            .map(|year| self.extractor.fetch_year(year))
            .collect();
        if year_futures.is_empty() {
            return Err(CollectError::NoData(format!(
                "empty year range for {}",
                self.symbol()
            )));
        }

        let mut year_stream = stream::iter(year_futures).buffer_unordered(self.threads.max(1));

        let mut combined = DataFrame::default();
        while let Some(year_result) = year_stream.next().await {
            FrameBuilder::combine(&mut combined, year_result?)?;
        }
        FrameBuilder::finalize(&mut combined)?;
        Ok(combined)
    }
}
