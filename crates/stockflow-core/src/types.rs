use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit quantities. Wraps Decimal to prevent accidental f64 usage.
pub type Qty = Decimal;

/// All monetary values.
pub type Money = Decimal;

/// Whole-day durations used by the lead time resolver.
pub type Days = i64;

/// Marketplace code after standardization.
///
/// The closed set of markets the projection knows about. Codes outside this
/// set pass through as `Other` and are surfaced in the data-quality report,
/// never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Market {
    US,
    CA,
    MX,
    BR,
    CO,
    EU,
    UK,
    JP,
    AU,
    Other(String),
}

impl Market {
    /// Parse an already-standardized code. Unknown codes become `Other`.
    pub fn from_code(code: &str) -> Market {
        match code {
            "US" => Market::US,
            "CA" => Market::CA,
            "MX" => Market::MX,
            "BR" => Market::BR,
            "CO" => Market::CO,
            "EU" => Market::EU,
            "UK" => Market::UK,
            "JP" => Market::JP,
            "AU" => Market::AU,
            other => Market::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Market::US => "US",
            Market::CA => "CA",
            Market::MX => "MX",
            Market::BR => "BR",
            Market::CO => "CO",
            Market::EU => "EU",
            Market::UK => "UK",
            Market::JP => "JP",
            Market::AU => "AU",
            Market::Other(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Market::Other(_))
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Canonical per-product-per-market identity key.
///
/// Joins every source table. Built once during normalization from the
/// cross-platform product id (falling back to the internal id) and the
/// standardized market code; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    /// Concatenated key, e.g. `B0EXAMPLE1US`.
    pub key: String,
    /// The product id half of the key.
    pub product_id: String,
    /// The market half of the key.
    pub market: Market,
}

impl Reference {
    pub fn new(product_id: impl Into<String>, market: Market) -> Reference {
        let product_id = product_id.into();
        Reference {
            key: format!("{}{}", product_id, market.code()),
            product_id,
            market,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
