// src/config.rs

/// Bulk intraday endpoint. One request per symbol-month, full output, CSV body.
pub const ALPHA_VANTAGE_QUERY: &str = "https://www.alphavantage.co/query?function=TIME_SERIES_INTRADAY&symbol={symbol}&interval=1min&apikey={api_key}&month={month}&outputsize=full&datatype=csv";

/// Rolling minute-bar endpoint. One request per ticker-day, JSON envelope.
pub const YAHOO_CHART_QUERY: &str = "https://query1.finance.yahoo.com/v8/finance/chart/{ticker}?period1={period1}&period2={period2}&interval=1m&includeAdjustedClose=true";

/// Concurrent year fetches per symbol in the bulk collector.
pub const DEFAULT_POOL_WIDTH: usize = 4;

/// Length of the rolling collector's trailing window, in calendar days.
pub const ROLLING_WINDOW_DAYS: i64 = 30;

/// Bounds of the polite sleep between tickers in the rolling collector.
pub const TICKER_DELAY_MIN_SECS: f64 = 0.5;
pub const TICKER_DELAY_MAX_SECS: f64 = 1.0;

pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// The chart endpoint rejects requests without a browser user agent.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
