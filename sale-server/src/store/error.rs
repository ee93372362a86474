//! Listing store error types.

use thiserror::Error;

/// Errors that can occur while obtaining listing data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport failure (connection, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected our key
    #[error("unauthorized: check SALE_STORE_API_KEY")]
    Unauthorized,

    /// The API returned a non-success status
    #[error("store API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not the JSON we expected
    #[error("failed to parse store response: {message}")]
    Json { message: String },

    /// A seed file could not be read or held no usable listings
    #[error("seed data error: {message}")]
    Seed { message: String },

    /// Every fallback tier was empty
    #[error("no listing data available: {0}")]
    NoData(&'static str),
}
