//! Symbol reference table: glyph to the ISO codes that share it.
//!
//! The order inside each code list is load-bearing: an ambiguous symbol
//! resolves to the first listed code, so reordering entries changes
//! resolution results.

pub const SYMBOL_TABLE: &[(&str, &[&str])] = &[
    (
        "$",
        &[
            "CAD", "USD", "AUD", "NZD", "SGD", "HKD", "MXN", "ARS", "CLP", "COP",
        ],
    ),
    ("¥", &["CNY", "JPY"]),
    ("£", &["GBP", "EGP", "FKP", "GIP", "LBP", "SHP", "SYP"]),
    ("kr", &["DKK", "NOK", "SEK", "ISK"]),
    ("₱", &["PHP", "CUP"]),
    ("€", &["EUR"]),
    ("₹", &["INR"]),
    ("₩", &["KRW"]),
    ("₪", &["ILS"]),
    ("₺", &["TRY"]),
    ("₽", &["RUB"]),
    ("R$", &["BRL"]),
    ("฿", &["THB"]),
    ("₫", &["VND"]),
    ("zł", &["PLN"]),
    ("Kč", &["CZK"]),
    ("Ft", &["HUF"]),
    ("₴", &["UAH"]),
    ("₦", &["NGN"]),
    ("₨", &["PKR", "LKR", "MUR", "NPR", "SCR"]),
];

/// Lookup over [`SYMBOL_TABLE`], preserving the declared order.
#[derive(Debug, Clone, Copy)]
pub struct SymbolTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: SYMBOL_TABLE,
        }
    }

    /// All codes sharing `symbol`, in declared order, or `None` for an
    /// unknown symbol.
    pub fn codes_for(&self, symbol: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, codes)| *codes)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
