//! Token resolution: ISO codes pass through untouched, symbols are
//! disambiguated against the symbol table.

use crate::currencies::CurrencyCodes;
use crate::error::ConvertError;
use crate::symbols::SymbolTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCurrency {
    /// Canonical ISO code.
    pub code: String,
    /// Set only when the original token was a symbol rather than a code.
    pub symbol: Option<String>,
}

pub struct CurrencyResolver<'a> {
    codes: &'a dyn CurrencyCodes,
    symbols: &'a SymbolTable,
}

impl<'a> CurrencyResolver<'a> {
    pub fn new(codes: &'a dyn CurrencyCodes, symbols: &'a SymbolTable) -> Self {
        CurrencyResolver { codes, symbols }
    }

    /// Resolves a user token to a canonical currency code.
    ///
    /// A symbol shared by several codes resolves to the first code in the
    /// table's declared order; the full code list stays reachable through
    /// the symbol table for reporting.
    pub fn resolve(&self, token: &str) -> Result<ResolvedCurrency, ConvertError> {
        if self.codes.is_known_code(token) {
            return Ok(ResolvedCurrency {
                code: token.to_string(),
                symbol: None,
            });
        }

        let Some(shared) = self.symbols.codes_for(token) else {
            return Err(ConvertError::CurrencyNotRecognized(token.to_string()));
        };

        Ok(ResolvedCurrency {
            code: shared[0].to_string(),
            symbol: Some(token.to_string()),
        })
    }
}
