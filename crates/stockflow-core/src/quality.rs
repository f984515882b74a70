//! Per-run data-quality report.
//!
//! Every recoverable condition the engine encounters lands here instead of
//! aborting the batch; the report travels with the result table so
//! downstream consumers can see exactly what was defaulted, clamped, or
//! excluded.

use serde::Serialize;

/// An unknown market code seen in a source table.
#[derive(Debug, Clone, Serialize)]
pub struct UnknownMarket {
    pub table: &'static str,
    pub code: String,
}

/// A raw status code outside the closed stage catalog.
#[derive(Debug, Clone, Serialize)]
pub struct UnknownStage {
    pub order_number: String,
    pub code: String,
}

/// A supply or demand row excluded for lacking a master-data counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct UnmatchedReference {
    pub table: &'static str,
    pub key: String,
}

/// A negative or missing quantity clamped to zero.
#[derive(Debug, Clone, Serialize)]
pub struct ClampedQuantity {
    pub table: &'static str,
    pub key: String,
}

/// A lead-time lookup resolved through a default constant.
#[derive(Debug, Clone, Serialize)]
pub struct LeadTimeDefault {
    pub key: String,
    pub component: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DataQualityReport {
    pub unknown_markets: Vec<UnknownMarket>,
    pub unknown_stages: Vec<UnknownStage>,
    pub unmatched_references: Vec<UnmatchedReference>,
    pub clamped_quantities: Vec<ClampedQuantity>,
    pub lead_time_defaults: Vec<LeadTimeDefault>,
    /// References excluded from revenue metrics for lack of a resolvable
    /// unit price. All other metrics are still computed for them.
    pub unpriced_references: Vec<String>,
}

impl DataQualityReport {
    pub fn new() -> DataQualityReport {
        DataQualityReport::default()
    }

    pub fn warn_unknown_market(&mut self, table: &'static str, code: &str) {
        self.unknown_markets.push(UnknownMarket {
            table,
            code: code.to_string(),
        });
    }

    pub fn warn_unknown_stage(&mut self, order_number: &str, code: &str) {
        self.unknown_stages.push(UnknownStage {
            order_number: order_number.to_string(),
            code: code.to_string(),
        });
    }

    pub fn warn_unmatched(&mut self, table: &'static str, key: &str) {
        self.unmatched_references.push(UnmatchedReference {
            table,
            key: key.to_string(),
        });
    }

    pub fn warn_clamped(&mut self, table: &'static str, key: &str) {
        self.clamped_quantities.push(ClampedQuantity {
            table,
            key: key.to_string(),
        });
    }

    pub fn warn_lead_time_default(&mut self, key: &str, component: &str) {
        self.lead_time_defaults.push(LeadTimeDefault {
            key: key.to_string(),
            component: component.to_string(),
        });
    }

    pub fn warn_unpriced(&mut self, key: &str) {
        self.unpriced_references.push(key.to_string());
    }

    pub fn total_issues(&self) -> usize {
        self.unknown_markets.len()
            + self.unknown_stages.len()
            + self.unmatched_references.len()
            + self.clamped_quantities.len()
            + self.lead_time_defaults.len()
            + self.unpriced_references.len()
    }

    pub fn is_clean(&self) -> bool {
        self.total_issues() == 0
    }
}
