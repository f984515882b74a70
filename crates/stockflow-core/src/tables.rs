//! Row types for the ten independently-sourced tables the engine consumes.
//!
//! The upstream loader materializes these before the engine starts; the
//! engine performs the per-Reference join itself using the identity rules.
//! Field names deliberately match the export headers so the rows
//! deserialize straight out of CSV.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StockflowError;
use crate::types::{Money, Qty};
use crate::StockflowResult;

/// Monthly demand forecast line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandRow {
    pub marketplace: String,
    /// Internal product id; always present.
    pub internal_id: String,
    /// Cross-platform product id, preferred for the Reference key.
    pub product_id: Option<String>,
    /// Any date inside the forecast month.
    pub month: NaiveDate,
    pub quantity: Option<Qty>,
}

/// Current on-hand inventory snapshot, one row per product-market.
///
/// Besides the total, the snapshot breaks the position into availability
/// bands named by days-to-availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRow {
    pub marketplace: String,
    pub internal_id: Option<String>,
    pub product_id: Option<String>,
    /// Units on hand feeding week 0 of the waterfall.
    pub total_units: Option<Qty>,
    /// Sellable within a week.
    pub fulfillable: Option<Qty>,
    /// Received by the platform, sellable in ~3 weeks.
    pub platform_held: Option<Qty>,
    /// In transit to the platform, ~5 weeks out.
    pub inbound_to_platform: Option<Qty>,
    /// Held at a local source warehouse, transferable, ~7 weeks out.
    pub local_source: Option<Qty>,
    /// On the water, 35-98 days out.
    pub transit_35_98d: Option<Qty>,
    /// In production, 28-126 days out.
    pub production_28_126d: Option<Qty>,
    /// In production, 56-168 days out.
    pub production_56_168d: Option<Qty>,
}

/// Open purchase-order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenOrderRow {
    pub order_number: String,
    pub line_id: String,
    pub internal_id: String,
    pub product_id: Option<String>,
    pub marketplace: String,
    /// Raw lifecycle status code; classified by the stage catalog.
    pub status: String,
    /// Undelivered units on the line.
    pub quantity: Option<Qty>,
    /// Confirmed-ready date the lead time anchors on.
    pub confirmed_ready_date: Option<NaiveDate>,
    pub wh_type: Option<String>,
    pub vendor_name: Option<String>,
}

/// Inbound shipment line already underway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundRow {
    pub internal_id: String,
    pub product_id: Option<String>,
    pub marketplace: String,
    pub quantity: Option<Qty>,
    pub vendor_name: Option<String>,
    pub carrier_expected_date: Option<NaiveDate>,
    pub actual_arrival_date: Option<NaiveDate>,
    pub movement_date: Option<NaiveDate>,
    pub confirmed_ready_date: Option<NaiveDate>,
}

/// Product master data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterRow {
    pub internal_id: String,
    pub product_id: Option<String>,
    pub production_lead_time_days: Option<i64>,
    pub units_per_carton: Option<u32>,
    pub carton_weight_kg: Option<Qty>,
    pub carton_volume: Option<Qty>,
    pub size_tier: Option<String>,
    pub preferred_vendor: Option<String>,
}

/// Vendor master data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorRow {
    pub vendor_id: String,
    pub vendor_name: Option<String>,
    /// Country the vendor ships from; mapped to a region via configuration.
    pub country: Option<String>,
    pub port_of_departure: Option<String>,
}

/// Resolved sales price per product-market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRow {
    pub product_id: String,
    pub marketplace: String,
    /// Planning benchmark price; wins when present and positive.
    pub benchmark_price: Option<Money>,
    /// Trailing realized average; the fallback.
    pub trailing_avg_price: Option<Money>,
}

/// Product to preferred-vendor mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVendorRow {
    pub product_id: String,
    pub vendor_id: String,
}

/// Delivery-performance correction per order line.
///
/// When present, the corrected status supersedes the raw order status
/// before classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryPerformanceRow {
    pub order_number: String,
    pub line_id: String,
    pub status: String,
}

/// A product-market that is actively sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveProductRow {
    pub internal_id: Option<String>,
    pub product_id: Option<String>,
    pub marketplace: String,
}

/// The fully materialized batch input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceTables {
    pub demand: Vec<DemandRow>,
    pub inventory: Vec<InventoryRow>,
    pub open_orders: Vec<OpenOrderRow>,
    pub inbound: Vec<InboundRow>,
    pub master: Vec<MasterRow>,
    pub vendors: Vec<VendorRow>,
    pub prices: Vec<PriceRow>,
    pub product_vendors: Vec<ProductVendorRow>,
    pub delivery_performance: Vec<DeliveryPerformanceRow>,
    pub active_products: Vec<ActiveProductRow>,
}

impl SourceTables {
    /// Schema validation. Demand, inventory, and master data are required;
    /// a run without them aborts with no partial result.
    pub fn validate(&self) -> StockflowResult<()> {
        if self.demand.is_empty() {
            return Err(StockflowError::MissingTable("demand".into()));
        }
        if self.inventory.is_empty() {
            return Err(StockflowError::MissingTable("inventory".into()));
        }
        if self.master.is_empty() {
            return Err(StockflowError::MissingTable("master".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn minimal_tables() -> SourceTables {
        SourceTables {
            demand: vec![DemandRow {
                marketplace: "US".into(),
                internal_id: "R-1".into(),
                product_id: Some("B0A".into()),
                month: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                quantity: Some(dec!(100)),
            }],
            inventory: vec![InventoryRow {
                marketplace: "US".into(),
                internal_id: Some("R-1".into()),
                product_id: Some("B0A".into()),
                total_units: Some(dec!(40)),
                fulfillable: None,
                platform_held: None,
                inbound_to_platform: None,
                local_source: None,
                transit_35_98d: None,
                production_28_126d: None,
                production_56_168d: None,
            }],
            master: vec![MasterRow {
                internal_id: "R-1".into(),
                product_id: Some("B0A".into()),
                production_lead_time_days: Some(45),
                units_per_carton: Some(10),
                carton_weight_kg: None,
                carton_volume: None,
                size_tier: None,
                preferred_vendor: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_minimal_tables() {
        assert!(minimal_tables().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_demand() {
        let mut tables = minimal_tables();
        tables.demand.clear();
        assert!(matches!(
            tables.validate(),
            Err(StockflowError::MissingTable(t)) if t == "demand"
        ));
    }

    #[test]
    fn test_validate_requires_master() {
        let mut tables = minimal_tables();
        tables.master.clear();
        assert!(matches!(
            tables.validate(),
            Err(StockflowError::MissingTable(t)) if t == "master"
        ));
    }
}
