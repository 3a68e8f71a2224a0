use anyhow::anyhow;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::cache::RateCache;
use crate::error::ConvertError;
use crate::rate_provider::RateProvider;

/// Rate provider backed by a theforexapi.com-compatible latest-rates
/// endpoint (`GET /api/latest?base=EUR&symbols=CZK`).
pub struct ForexApiProvider {
    base_url: String,
    cache: RateCache,
}

impl ForexApiProvider {
    pub fn new(base_url: &str, cache: RateCache) -> Self {
        ForexApiProvider {
            base_url: base_url.to_string(),
            cache,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ForexApiProvider {
    #[instrument(name = "ForexRateFetch", skip(self), fields(from = %from, to = %to))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, ConvertError> {
        let pair = format!("{from}{to}");
        if let Some(cached) = self.cache.get(&pair).await {
            return Ok(cached);
        }

        let url = format!("{}/api/latest?base={}&symbols={}", self.base_url, from, to);
        debug!("Requesting rate from {}", url);

        let client = reqwest::Client::builder().user_agent("fxconv/0.1").build()?;
        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            // The API answers 4xx for base currencies it does not quote.
            debug!(status = %response.status(), %pair, "Rate source returned error status");
            return Err(ConvertError::RateUnavailable {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse rates response for {}: {}", pair, e))?;

        let rate =
            data.rates
                .get(to)
                .copied()
                .ok_or_else(|| ConvertError::RateUnavailable {
                    from: from.to_string(),
                    to: to.to_string(),
                })?;

        self.cache.put(pair, rate).await;
        Ok(rate)
    }
}
