//! Rate lookup abstraction over the external exchange-rate source.

use crate::error::ConvertError;
use async_trait::async_trait;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Current exchange rate from one currency code to another. Fails with
    /// [`ConvertError::RateUnavailable`] when the source publishes no rate
    /// for the pair.
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, ConvertError>;
}
