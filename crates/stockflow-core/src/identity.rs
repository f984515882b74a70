//! Canonical identity derivation and market-code standardization.
//!
//! Every source table resolves to a [`Reference`] through the same two
//! rules, which are authoritative regardless of how a table was produced:
//! standardize the market code, then key on the cross-platform product id
//! with the internal id as fallback.

use crate::types::{Market, Reference};

/// Raw market codes folded into a unified code before anything else
/// touches them.
const MARKET_ALIASES: [(&str, &str); 4] = [
    ("Pan-EU", "EU"),
    ("DE", "EU"),
    ("GB", "UK"),
    ("North America", "US"),
];

/// Standardize a raw marketplace code.
///
/// Codes outside the known market set pass through unchanged as
/// [`Market::Other`]; the caller records the data-quality warning.
pub fn standardize_market(raw: &str) -> Market {
    let trimmed = raw.trim();
    for (alias, unified) in MARKET_ALIASES {
        if trimmed == alias {
            return Market::from_code(unified);
        }
    }
    Market::from_code(trimmed)
}

/// Derive the canonical Reference for a row.
///
/// Prefers the cross-platform product id, falls back to the internal id,
/// and returns None when the row carries neither.
pub fn derive_reference(
    product_id: Option<&str>,
    internal_id: Option<&str>,
    market: &Market,
) -> Option<Reference> {
    let id = non_empty(product_id).or_else(|| non_empty(internal_id))?;
    Some(Reference::new(id, market.clone()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regional_variants_fold_into_eu() {
        assert_eq!(standardize_market("Pan-EU"), Market::EU);
        assert_eq!(standardize_market("DE"), Market::EU);
    }

    #[test]
    fn test_national_code_folds_into_uk() {
        assert_eq!(standardize_market("GB"), Market::UK);
    }

    #[test]
    fn test_north_america_folds_into_us() {
        assert_eq!(standardize_market("North America"), Market::US);
    }

    #[test]
    fn test_known_codes_pass_through() {
        assert_eq!(standardize_market("US"), Market::US);
        assert_eq!(standardize_market(" EU "), Market::EU);
    }

    #[test]
    fn test_unknown_code_passes_through_as_other() {
        let market = standardize_market("ZA");
        assert_eq!(market, Market::Other("ZA".into()));
    }

    #[test]
    fn test_reference_prefers_product_id() {
        let r = derive_reference(Some("B0A"), Some("R-1"), &Market::US).unwrap();
        assert_eq!(r.key, "B0AUS");
    }

    #[test]
    fn test_reference_falls_back_to_internal_id() {
        let r = derive_reference(None, Some("R-1"), &Market::EU).unwrap();
        assert_eq!(r.key, "R-1EU");

        let blank = derive_reference(Some("  "), Some("R-1"), &Market::EU).unwrap();
        assert_eq!(blank.key, "R-1EU");
    }

    #[test]
    fn test_reference_requires_some_id() {
        assert!(derive_reference(None, None, &Market::US).is_none());
        assert!(derive_reference(Some(""), Some(" "), &Market::US).is_none());
    }
}
