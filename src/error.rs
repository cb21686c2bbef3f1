// src/error.rs

use polars::prelude::PolarsError;
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectError>;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to get data from {url}: status {status}")]
    Fetch { url: String, status: StatusCode },

    #[error("{url} answered with a non-CSV payload")]
    VendorPayload { url: String },

    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unexpected table shape: {0}")]
    Shape(String),

    #[error("no data: {0}")]
    NoData(String),
}
