//! Conversion orchestration: resolve both tokens, delegate rate lookups,
//! and shape the result document.

use std::collections::BTreeMap;

use comfy_table::Cell;
use futures::future::join_all;
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::debug;

use crate::currencies::CurrencyCodes;
use crate::error::ConvertError;
use crate::rate_provider::RateProvider;
use crate::resolver::{CurrencyResolver, ResolvedCurrency};
use crate::symbols::SymbolTable;
use crate::ui;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InputAmount {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConversionResult {
    pub input: InputAmount,
    /// Converted amount per output code. A convert-to-all request only
    /// carries the codes the rate source could satisfy.
    pub output: BTreeMap<String, f64>,
    /// Full code list per ambiguous symbol used in the request. Absent when
    /// both tokens were plain codes or unshared symbols.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_currencies: Option<BTreeMap<String, Vec<String>>>,
}

impl ConversionResult {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Amount")]);

        for (code, amount) in &self.output {
            table.add_row(vec![Cell::new(code), ui::amount_cell(*amount)]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text(
                &format!("{} {}", self.input.amount, self.input.currency),
                ui::StyleType::Title,
            )
        );
        output.push_str(&table.to_string());

        if let Some(symbol_currencies) = &self.symbol_currencies {
            for (symbol, codes) in symbol_currencies {
                output.push_str(&format!(
                    "\n{}",
                    ui::style_text(
                        &format!("Symbol {} is also used by: {}", symbol, codes.join(", ")),
                        ui::StyleType::Subtle,
                    )
                ));
            }
        }

        output
    }
}

pub struct Converter<'a> {
    codes: &'a dyn CurrencyCodes,
    symbols: &'a SymbolTable,
    rates: &'a dyn RateProvider,
}

impl<'a> Converter<'a> {
    pub fn new(
        codes: &'a dyn CurrencyCodes,
        symbols: &'a SymbolTable,
        rates: &'a dyn RateProvider,
    ) -> Self {
        Converter {
            codes,
            symbols,
            rates,
        }
    }

    /// Converts `amount` between the given tokens.
    ///
    /// An empty output token means "convert to every known currency": codes
    /// without a published rate are skipped and the output is a partial
    /// mapping. An explicit output token is all-or-nothing and fails with
    /// [`ConvertError::RatesNotAvailable`] when its rate is missing.
    pub async fn convert(
        &self,
        amount: f64,
        input_token: &str,
        output_token: &str,
        progress: Option<&ProgressBar>,
    ) -> Result<ConversionResult, ConvertError> {
        let resolver = CurrencyResolver::new(self.codes, self.symbols);

        // Both tokens must resolve before any rate lookup happens.
        let input = resolver.resolve(input_token)?;
        let output = if output_token.is_empty() {
            None
        } else {
            Some(resolver.resolve(output_token)?)
        };

        let mut converted = BTreeMap::new();
        match &output {
            Some(out) => {
                let rate = match self.rates.get_rate(&input.code, &out.code).await {
                    Ok(rate) => rate,
                    Err(ConvertError::RateUnavailable { from, to }) => {
                        return Err(ConvertError::RatesNotAvailable { from, to });
                    }
                    Err(e) => return Err(e),
                };
                converted.insert(out.code.clone(), amount * rate);
            }
            None => {
                let lookups = self.codes.all_codes().iter().copied().map(|to| {
                    let from = input.code.clone();
                    async move {
                        let result = self.rates.get_rate(&from, to).await;
                        if let Some(pb) = progress {
                            pb.inc(1);
                        }
                        (to, result)
                    }
                });

                for (to, result) in join_all(lookups).await {
                    match result {
                        Ok(rate) => {
                            converted.insert(to.to_string(), amount * rate);
                        }
                        Err(ConvertError::RateUnavailable { .. }) => {
                            debug!(code = to, "No rate published, skipping");
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        let symbol_currencies = self.collect_symbol_currencies(&input, output.as_ref());

        Ok(ConversionResult {
            input: InputAmount {
                amount,
                currency: input.code,
            },
            output: converted,
            symbol_currencies,
        })
    }

    /// Full code list for every request token that resolved from a symbol
    /// shared by more than one code.
    fn collect_symbol_currencies(
        &self,
        input: &ResolvedCurrency,
        output: Option<&ResolvedCurrency>,
    ) -> Option<BTreeMap<String, Vec<String>>> {
        let mut symbol_currencies = BTreeMap::new();
        for resolved in [Some(input), output].into_iter().flatten() {
            if let Some(symbol) = &resolved.symbol {
                if let Some(shared) = self.symbols.codes_for(symbol) {
                    if shared.len() > 1 {
                        symbol_currencies.insert(
                            symbol.clone(),
                            shared.iter().map(|c| c.to_string()).collect(),
                        );
                    }
                }
            }
        }
        (!symbol_currencies.is_empty()).then_some(symbol_currencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currencies::IsoCurrencies;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Fixed in-memory rate table; everything absent is unavailable.
    struct FixedRates {
        rates: HashMap<String, f64>,
    }

    impl FixedRates {
        fn new(pairs: &[(&str, &str, f64)]) -> Self {
            FixedRates {
                rates: pairs
                    .iter()
                    .map(|(from, to, rate)| (format!("{from}{to}"), *rate))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl RateProvider for FixedRates {
        async fn get_rate(&self, from: &str, to: &str) -> Result<f64, ConvertError> {
            self.rates.get(&format!("{from}{to}")).copied().ok_or_else(|| {
                ConvertError::RateUnavailable {
                    from: from.to_string(),
                    to: to.to_string(),
                }
            })
        }
    }

    fn converter_fixtures(pairs: &[(&str, &str, f64)]) -> (IsoCurrencies, SymbolTable, FixedRates) {
        (IsoCurrencies, SymbolTable::new(), FixedRates::new(pairs))
    }

    #[tokio::test]
    async fn test_convert_plain_codes() {
        let (codes, symbols, rates) = converter_fixtures(&[("EUR", "CZK", 25.64)]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let result = converter.convert(100.0, "EUR", "CZK", None).await.unwrap();

        assert_eq!(result.input.amount, 100.0);
        assert_eq!(result.input.currency, "EUR");
        assert_eq!(result.output.len(), 1);
        assert_eq!(result.output.get("CZK"), Some(&2564.0));
        assert!(result.symbol_currencies.is_none());
    }

    #[tokio::test]
    async fn test_convert_from_dollar_symbol() {
        let (codes, symbols, rates) = converter_fixtures(&[("CAD", "CZK", 16.5)]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let result = converter.convert(58.5, "$", "CZK", None).await.unwrap();

        // "$" resolves to the table's first listed dollar code.
        assert_eq!(result.input.currency, "CAD");
        assert!(result.output.contains_key("CZK"));
        let symbol_currencies = result.symbol_currencies.unwrap();
        let dollar_codes = symbol_currencies.get("$").unwrap();
        assert!(dollar_codes.len() >= 2);
        assert!(dollar_codes.contains(&"USD".to_string()));
    }

    #[tokio::test]
    async fn test_convert_to_all_skips_unavailable_codes() {
        let (codes, symbols, rates) =
            converter_fixtures(&[("CNY", "CZK", 3.3), ("CNY", "EUR", 0.13)]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let result = converter.convert(1.001, "¥", "", None).await.unwrap();

        assert_eq!(result.input.currency, "CNY");
        // Only the pairs the source publishes survive; the rest are skipped
        // without failing the request.
        assert_eq!(result.output.len(), 2);
        assert!(result.output.contains_key("CZK"));
        assert!(result.output.contains_key("EUR"));
        assert_eq!(
            result.symbol_currencies.unwrap().get("¥").unwrap(),
            &vec!["CNY".to_string(), "JPY".to_string()]
        );
    }

    #[tokio::test]
    async fn test_single_pair_without_rate_fails() {
        let (codes, symbols, rates) = converter_fixtures(&[]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let err = converter.convert(100.0, "EUR", "CZK", None).await.unwrap_err();
        assert!(matches!(
            err,
            ConvertError::RatesNotAvailable { ref from, ref to } if from == "EUR" && to == "CZK"
        ));
        assert_eq!(
            err.to_string(),
            "Data for this currency conversion is not available."
        );
    }

    #[tokio::test]
    async fn test_unrecognized_currency_aborts_before_lookup() {
        let (codes, symbols, rates) = converter_fixtures(&[("EUR", "CZK", 25.64)]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let err = converter.convert(100.0, "KIWI", "CZK", None).await.unwrap_err();
        assert!(matches!(err, ConvertError::CurrencyNotRecognized(ref t) if t == "KIWI"));

        let err = converter.convert(100.0, "EUR", "KIWI", None).await.unwrap_err();
        assert!(matches!(err, ConvertError::CurrencyNotRecognized(ref t) if t == "KIWI"));
    }

    #[tokio::test]
    async fn test_output_symbol_reported_in_symbol_currencies() {
        let (codes, symbols, rates) = converter_fixtures(&[("EUR", "CAD", 1.47)]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let result = converter.convert(10.0, "EUR", "$", None).await.unwrap();

        assert_eq!(result.input.currency, "EUR");
        assert!(result.output.contains_key("CAD"));
        assert!(result.symbol_currencies.unwrap().contains_key("$"));
    }

    #[tokio::test]
    async fn test_single_code_symbol_has_no_symbol_currencies() {
        let (codes, symbols, rates) = converter_fixtures(&[("EUR", "CZK", 25.64)]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let result = converter.convert(5.0, "€", "CZK", None).await.unwrap();

        assert_eq!(result.input.currency, "EUR");
        assert!(result.symbol_currencies.is_none());
    }

    #[tokio::test]
    async fn test_result_serialization_shape() {
        let (codes, symbols, rates) = converter_fixtures(&[("CAD", "CZK", 16.5)]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let result = converter.convert(58.5, "$", "CZK", None).await.unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["input"]["amount"], 58.5);
        assert_eq!(json["input"]["currency"], "CAD");
        assert!((json["output"]["CZK"].as_f64().unwrap() - 58.5 * 16.5).abs() < 1e-9);
        assert!(json["symbol_currencies"]["$"].as_array().unwrap().len() >= 2);

        let plain = converter.convert(100.0, "EUR", "CZK", None).await;
        // EUR/CAD rate is not in the fixture, only CAD/CZK.
        assert!(plain.is_err());

        let (codes, symbols, rates) = converter_fixtures(&[("EUR", "CZK", 25.64)]);
        let converter = Converter::new(&codes, &symbols, &rates);
        let plain = converter.convert(100.0, "EUR", "CZK", None).await.unwrap();
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("symbol_currencies").is_none());
    }

    #[tokio::test]
    async fn test_convert_is_idempotent_against_stable_rates() {
        let (codes, symbols, rates) = converter_fixtures(&[("CAD", "CZK", 16.5)]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let first = converter.convert(58.5, "$", "CZK", None).await.unwrap();
        let second = converter.convert(58.5, "$", "CZK", None).await.unwrap();

        assert_eq!(first.input, second.input);
        assert_eq!(first.symbol_currencies, second.symbol_currencies);
        assert_eq!(first.output, second.output);
    }

    #[tokio::test]
    async fn test_zero_and_negative_amounts_pass_through() {
        let (codes, symbols, rates) = converter_fixtures(&[("EUR", "CZK", 25.0)]);
        let converter = Converter::new(&codes, &symbols, &rates);

        let zero = converter.convert(0.0, "EUR", "CZK", None).await.unwrap();
        assert_eq!(zero.output.get("CZK"), Some(&0.0));

        let negative = converter.convert(-2.0, "EUR", "CZK", None).await.unwrap();
        assert_eq!(negative.output.get("CZK"), Some(&-50.0));
    }
}
