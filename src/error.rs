//! Error taxonomy for conversion requests.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// Token matched neither a known ISO code nor a known symbol.
    #[error("Currency {0} not recognized.")]
    CurrencyNotRecognized(String),

    /// The rate source publishes no rate for this pair. During
    /// convert-to-all enumeration this is skipped per code, never fatal.
    #[error("No rate published for {from}/{to}")]
    RateUnavailable { from: String, to: String },

    /// An explicit single-pair conversion could not be satisfied.
    #[error("Data for this currency conversion is not available.")]
    RatesNotAvailable { from: String, to: String },

    #[error("Rate request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
