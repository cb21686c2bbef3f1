// src/intraday_extractor.rs

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use log::info;
use polars::prelude::*;

use crate::config::ALPHA_VANTAGE_QUERY;
use crate::error::{CollectError, Result};
use crate::intraday_info::IntradayInfo;
use crate::session::HttpSession;

/// One month of 1-minute bars from the bulk vendor, as a vendor-native table.
#[async_trait]
pub trait MonthFetcher: Send + Sync {
    /// `month` is formatted `YYYY-MM`.
    async fn fetch_month(&self, symbol: &str, month: &str) -> Result<DataFrame>;
}

/// Bulk intraday endpoint, keyed by an API token.
pub struct AlphaVantageFetcher {
    api_key: String,
    base_query: String,
}

impl AlphaVantageFetcher {
    pub fn new(api_key: String) -> Self {
        AlphaVantageFetcher {
            api_key,
            base_query: ALPHA_VANTAGE_QUERY.to_string(),
        }
    }

    pub fn month_url(&self, symbol: &str, month: &str) -> String {
        QueryBuilder::build(
            &self.base_query,
            &[
                ("symbol", symbol),
                ("api_key", &self.api_key),
                ("month", month),
            ],
        )
    }
}

#[async_trait]
impl MonthFetcher for AlphaVantageFetcher {
    async fn fetch_month(&self, symbol: &str, month: &str) -> Result<DataFrame> {
        let url = self.month_url(symbol, month);
        let response = HttpSession::send_request(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Fetch { url, status });
        }
        let body = response.text().await?;
        ResponseDecoder::decode(&body, &url)
    }
}

/// Builds query URLs by replacing `{placeholder}` markers in the base query.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn build(base_query: &str, replacements: &[(&str, &str)]) -> String {
        replacements
            .iter()
            .fold(base_query.to_string(), |query, (key, value)| {
                query.replace(&format!("{{{key}}}"), value)
            })
    }
}

/// Decodes a vendor CSV body into a table.
pub struct ResponseDecoder;

impl ResponseDecoder {
    pub fn decode(body: &str, url: &str) -> Result<DataFrame> {
        // A throttled or mis-keyed request still comes back 200, with a JSON
        // note instead of CSV.
        if body.trim_start().starts_with('{') {
            return Err(CollectError::VendorPayload {
                url: url.to_string(),
            });
        }
        let df = CsvReader::new(Cursor::new(body.to_owned().into_bytes()))
            .has_header(true)
            .finish()?;
        Ok(df)
    }
}

/// Months of `year` with complete data, as `YYYY-MM` strings. The month
/// still in progress is never requested.
pub fn month_range(year: i32, today: NaiveDate) -> Vec<String> {
    let month_max = if year < today.year() {
        12
    } else {
        today.month() as i32 - 1
    };
    (1..=month_max)
        .map(|month| format!("{year}-{month:02}"))
        .collect()
}

/// Fetches full years of 1-minute bars for one symbol, month by month.
pub struct IntradayExtractor<F: MonthFetcher> {
    pub fetcher: Arc<F>,
    pub info: IntradayInfo,
}

impl<F: MonthFetcher> IntradayExtractor<F> {
    /// Concatenates all month tables of `year` in calendar order. Months are
    /// fetched sequentially to keep the per-symbol request rate down; any
    /// month failure fails the year.
    pub async fn fetch_year(&self, year: i32) -> Result<DataFrame> {
        let symbol = &self.info.symbol;
        let months = month_range(year, Local::now().date_naive());
        if months.is_empty() {
            return Err(CollectError::NoData(format!(
                "no complete months in {year} yet"
            )));
        }

        let mut combined = DataFrame::default();
        for (index, month) in months.iter().enumerate() {
            let month_df = self.fetcher.fetch_month(symbol, month).await?;
            info!(
                "[{symbol} {year}] {month} fetched ({}/{})",
                index + 1,
                months.len()
            );
            FrameBuilder::combine(&mut combined, month_df)?;
        }
        Ok(combined)
    }
}

/// Accumulates vendor tables into one combined table.
pub struct FrameBuilder;

impl FrameBuilder {
    pub fn combine(combined_df: &mut DataFrame, df: DataFrame) -> Result<()> {
        if combined_df.width() == 0 {
            *combined_df = df;
        } else {
            combined_df.vstack_mut(&df)?;
        }
        Ok(())
    }

    /// Restores chronological order after completion-order accumulation.
    pub fn finalize(combined_df: &mut DataFrame) -> Result<()> {
        if combined_df.get_column_names().contains(&"timestamp") {
            combined_df.sort_in_place(&["timestamp"], SortMultipleOptions::default())?;
        }
        Ok(())
    }
}
