use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Process-scoped cache of fetched exchange rates, keyed by currency pair
/// (e.g. "EURCZK"). Rate freshness is the rate source's concern; this only
/// avoids repeating identical lookups within one run.
#[derive(Clone, Default)]
pub struct RateCache {
    inner: Arc<Mutex<HashMap<String, f64>>>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, pair: &str) -> Option<f64> {
        let cache = self.inner.lock().await;
        let rate = cache.get(pair).copied();
        if rate.is_some() {
            debug!("Rate cache HIT");
        } else {
            debug!("Rate cache MISS");
        }
        rate
    }

    pub async fn put(&self, pair: String, rate: f64) {
        let mut cache = self.inner.lock().await;
        debug!("Rate cache PUT");
        cache.insert(pair, rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_get_put() {
        let cache = RateCache::new();

        assert!(cache.get("EURCZK").await.is_none());

        cache.put("EURCZK".to_string(), 25.64).await;

        assert_eq!(cache.get("EURCZK").await, Some(25.64));
        assert!(cache.get("CZKEUR").await.is_none());
    }
}
