//! Connectivity probe used by the front ends before converting.

use std::time::Duration;
use tracing::debug;

/// Returns true when `url` answers within a second. Conversion needs live
/// rate data, so the CLI checks this up front instead of failing midway.
pub async fn is_online(url: &str) -> bool {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    {
        Ok(client) => client,
        Err(_) => return false,
    };

    match client.get(url).send().await {
        Ok(_) => true,
        Err(e) => {
            debug!("Connectivity probe failed: {e}");
            false
        }
    }
}
