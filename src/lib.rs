pub mod api;
pub mod cache;
pub mod config;
pub mod converter;
pub mod currencies;
pub mod error;
pub mod log;
pub mod net;
pub mod providers;
pub mod rate_provider;
pub mod resolver;
pub mod symbols;
pub mod ui;

use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::cache::RateCache;
use crate::converter::Converter;
use crate::currencies::{CurrencyCodes, IsoCurrencies};
use crate::providers::forex_api::ForexApiProvider;
use crate::symbols::SymbolTable;

fn load_config(config_path: Option<&str>) -> Result<config::AppConfig> {
    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_convert(
    amount: f64,
    input_currency: &str,
    output_currency: &str,
    json: bool,
    config_path: Option<&str>,
) -> Result<()> {
    let config = load_config(config_path)?;

    if !net::is_online(&config.probe_url).await {
        bail!("Connect to the internet to get the currency data.");
    }

    let rates = ForexApiProvider::new(config.rates_base_url(), RateCache::new());
    let codes = IsoCurrencies;
    let symbols = SymbolTable::new();
    let converter = Converter::new(&codes, &symbols, &rates);

    // Convert-to-all issues one lookup per known code; show progress unless
    // the caller asked for machine-readable output.
    let progress = (!json && output_currency.is_empty()).then(|| {
        let pb = ui::new_progress_bar(codes.all_codes().len() as u64, true);
        pb.set_message("Fetching rates...");
        pb
    });

    let result = converter
        .convert(amount, input_currency, output_currency, progress.as_ref())
        .await;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let result = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.display_as_table());
    }
    Ok(())
}

pub async fn run_serve(listen: Option<&str>, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    info!("Currency converter API starting...");

    let state = Arc::new(api::AppState {
        rates: Box::new(ForexApiProvider::new(
            config.rates_base_url(),
            RateCache::new(),
        )),
        codes: IsoCurrencies,
        symbols: SymbolTable::new(),
    });

    api::serve(state, listen.unwrap_or(&config.listen_addr)).await
}
