// src/window_extractor.rs

use async_trait::async_trait;
use chrono::{Datelike, Duration as ChronoDuration, NaiveDate};
use log::debug;
use polars::prelude::*;
use serde::Deserialize;

use crate::config::{ROLLING_WINDOW_DAYS, YAHOO_CHART_QUERY};
use crate::error::Result;
use crate::intraday_extractor::QueryBuilder;
use crate::market_time::MarketTimezone;
use crate::session::HttpSession;

/// Column layout of a fetched raw minute table, timestamp first.
pub const RAW_COLUMNS: [&str; 7] = [
    "Datetime",
    "Adj Close",
    "Close",
    "High",
    "Low",
    "Open",
    "Volume",
];

#[async_trait]
pub trait MinuteFetcher: Send + Sync {
    /// 1-minute bars for `[start, end)`. An empty table means the vendor had
    /// no data there; only transport failures are errors.
    async fn fetch_minutes(&self, ticker: &str, start: NaiveDate, end: NaiveDate)
        -> Result<DataFrame>;
}

#[derive(Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartSeries>>,
    error: Option<ChartFault>,
}

#[derive(Deserialize)]
struct ChartFault {
    code: String,
    description: String,
}

#[derive(Deserialize)]
struct ChartSeries {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
    adjclose: Option<Vec<ChartAdjClose>>,
}

#[derive(Deserialize)]
struct ChartQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

#[derive(Deserialize)]
struct ChartAdjClose {
    adjclose: Vec<Option<f64>>,
}

/// Rolling minute-bar endpoint (v8 chart API).
pub struct YahooFetcher {
    base_query: String,
    market: MarketTimezone,
}

impl YahooFetcher {
    pub fn new() -> Self {
        YahooFetcher {
            base_query: YAHOO_CHART_QUERY.to_string(),
            market: MarketTimezone::Eastern,
        }
    }

    pub fn chart_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Option<String> {
        let period1 = self.market.day_start_timestamp(start)?;
        let period2 = self.market.day_start_timestamp(end)?;
        Some(QueryBuilder::build(
            &self.base_query,
            &[
                ("ticker", ticker),
                ("period1", &period1.to_string()),
                ("period2", &period2.to_string()),
            ],
        ))
    }

    fn decode(&self, body: &str) -> Result<DataFrame> {
        let envelope: ChartEnvelope = match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(_) => return Ok(DataFrame::default()),
        };
        if let Some(fault) = envelope.chart.error {
            debug!("chart error {}: {}", fault.code, fault.description);
            return Ok(DataFrame::default());
        }
        let series = envelope.chart.result.and_then(|mut result| {
            if result.is_empty() {
                None
            } else {
                Some(result.remove(0))
            }
        });
        match series {
            Some(series) => FrameAssembler::assemble(&self.market, series),
            None => Ok(DataFrame::default()),
        }
    }
}

impl Default for YahooFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MinuteFetcher for YahooFetcher {
    async fn fetch_minutes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DataFrame> {
        let Some(url) = self.chart_url(ticker, start, end) else {
            return Ok(DataFrame::default());
        };
        let response = HttpSession::send_request(&url).await?;
        if !response.status().is_success() {
            // Unknown tickers and out-of-range days come back as error
            // statuses; both read as "no data".
            return Ok(DataFrame::default());
        }
        let body = response.text().await?;
        self.decode(&body)
    }
}

/// Builds the raw minute table from a decoded chart payload.
struct FrameAssembler;

impl FrameAssembler {
    fn assemble(market: &MarketTimezone, series: ChartSeries) -> Result<DataFrame> {
        let Some(timestamps) = series.timestamp else {
            return Ok(DataFrame::default());
        };
        let Some(quote) = series.indicators.quote.into_iter().next() else {
            return Ok(DataFrame::default());
        };
        let adj = series
            .indicators
            .adjclose
            .and_then(|series| series.into_iter().next())
            .map(|adj| adj.adjclose);

        let mut datetime = Vec::with_capacity(timestamps.len());
        let mut adj_close = Vec::with_capacity(timestamps.len());
        let mut close = Vec::with_capacity(timestamps.len());
        let mut high = Vec::with_capacity(timestamps.len());
        let mut low = Vec::with_capacity(timestamps.len());
        let mut open = Vec::with_capacity(timestamps.len());
        let mut volume = Vec::with_capacity(timestamps.len());

        for (index, &stamp) in timestamps.iter().enumerate() {
            let open_value = quote.open.get(index).copied().flatten();
            let high_value = quote.high.get(index).copied().flatten();
            let low_value = quote.low.get(index).copied().flatten();
            let close_value = quote.close.get(index).copied().flatten();
            let volume_value = quote.volume.get(index).copied().flatten();

            // Padding minutes carry no fields at all; drop them.
            if open_value.is_none()
                && high_value.is_none()
                && low_value.is_none()
                && close_value.is_none()
                && volume_value.is_none()
            {
                continue;
            }

            let Some(rendered) = market.format_minute(stamp) else {
                continue;
            };

            let close_value = close_value.unwrap_or(f64::NAN);
            datetime.push(rendered);
            adj_close.push(
                adj.as_ref()
                    .and_then(|values| values.get(index).copied().flatten())
                    .unwrap_or(close_value),
            );
            close.push(close_value);
            high.push(high_value.unwrap_or(f64::NAN));
            low.push(low_value.unwrap_or(f64::NAN));
            open.push(open_value.unwrap_or(f64::NAN));
            volume.push(volume_value.unwrap_or(0));
        }

        if datetime.is_empty() {
            return Ok(DataFrame::default());
        }

        let df = DataFrame::new(vec![
            Series::new(RAW_COLUMNS[0], datetime),
            Series::new(RAW_COLUMNS[1], adj_close),
            Series::new(RAW_COLUMNS[2], close),
            Series::new(RAW_COLUMNS[3], high),
            Series::new(RAW_COLUMNS[4], low),
            Series::new(RAW_COLUMNS[5], open),
            Series::new(RAW_COLUMNS[6], volume),
        ])?;
        Ok(df)
    }
}

/// Assembles trailing windows of minute bars over any fetcher.
pub struct WindowExtractor<F: MinuteFetcher> {
    fetcher: F,
}

impl<F: MinuteFetcher> WindowExtractor<F> {
    pub fn new(fetcher: F) -> Self {
        WindowExtractor { fetcher }
    }

    /// One day of minute bars. Weekends resolve to `None` without touching
    /// the network; an empty table means the vendor had nothing (holiday).
    pub async fn fetch_day(&self, ticker: &str, date: NaiveDate) -> Result<Option<DataFrame>> {
        if date.weekday().num_days_from_monday() >= 5 {
            return Ok(None);
        }
        let end = date + ChronoDuration::days(1);
        let df = self.fetcher.fetch_minutes(ticker, date, end).await?;
        Ok(Some(df))
    }

    /// Trailing 30-day window ending at `end_date`, day tables concatenated
    /// in chronological order. `None` when no day in the window had data.
    pub async fn fetch_window(
        &self,
        ticker: &str,
        end_date: NaiveDate,
    ) -> Result<Option<DataFrame>> {
        let start = end_date - ChronoDuration::days(ROLLING_WINDOW_DAYS);
        let mut combined: Option<DataFrame> = None;

        let mut date = start;
        while date <= end_date {
            if let Some(day_df) = self.fetch_day(ticker, date).await? {
                if !day_df.is_empty() {
                    match combined.as_mut() {
                        Some(acc) => {
                            acc.vstack_mut(&day_df)?;
                        }
                        None => combined = Some(day_df),
                    }
                }
            }
            date += ChronoDuration::days(1);
        }
        Ok(combined)
    }
}
