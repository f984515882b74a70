//! Expedite/transfer recommendations from rolling-window threshold rules.
//!
//! All rules compare availability bands from the inventory snapshot against
//! rolling sums over the demand series. The windows differ by market
//! family: North-America markets plan further out than Europe/UK markets.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Market, Money, Qty};

/// Transfer-order window for North-America-family markets.
pub const TRANSFER_WINDOW_NA_WEEKS: usize = 10;
/// Transfer-order window for Europe/UK-family markets.
pub const TRANSFER_WINDOW_EU_WEEKS: usize = 7;
/// Demand window the expedite and prepone rules compare transit against.
pub const EXPEDITE_DEMAND_WEEKS: usize = 14;
/// Demand window the expedite rule compares production capacity against.
pub const EXPEDITE_SUPPLY_WEEKS: usize = 18;

/// Rolling-window length for the transfer rule, by market family.
/// Markets outside the configured families have no window and never raise
/// the transfer flag.
pub fn transfer_window(market: &Market) -> Option<usize> {
    match market {
        Market::US | Market::CA => Some(TRANSFER_WINDOW_NA_WEEKS),
        Market::EU | Market::UK => Some(TRANSFER_WINDOW_EU_WEEKS),
        _ => None,
    }
}

/// Sum of the next `weeks` weeks of demand, starting at the current week.
pub fn rolling_demand(demand: &[Qty], weeks: usize) -> Qty {
    demand.iter().take(weeks).copied().sum()
}

/// Availability bands from the inventory snapshot, named by
/// days-to-availability.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InventoryPosition {
    pub fulfillable: Qty,
    pub platform_held: Qty,
    pub inbound_to_platform: Qty,
    pub local_source: Qty,
    pub transit_35_98d: Qty,
    pub production_28_126d: Qty,
    pub production_56_168d: Qty,
}

impl InventoryPosition {
    /// Everything the platform can reach without a transfer order.
    fn reachable(&self) -> Qty {
        self.fulfillable + self.platform_held + self.inbound_to_platform
    }
}

/// Flags plus the rolling aggregates that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRecord {
    /// A transfer order should be checked/created.
    pub transfer_order: bool,
    /// Expedite pickup from the vendor: capacity exists, transit is the
    /// bottleneck.
    pub expedite: bool,
    /// Prepone the production-ready date.
    pub prepone: bool,
    pub window_weeks: Option<usize>,
    pub future_demand_window: Qty,
    pub future_demand_14w: Qty,
    pub future_demand_18w: Qty,
    /// Revenue recoverable through a transfer order.
    pub at_risk_margin: Money,
}

/// Evaluate all recommendation rules for one Reference.
pub fn evaluate(
    market: &Market,
    position: &InventoryPosition,
    demand: &[Qty],
    units_per_carton: u32,
    unit_price: Option<Money>,
) -> RecommendationRecord {
    let window_weeks = transfer_window(market);
    let future_demand_window = window_weeks
        .map(|weeks| rolling_demand(demand, weeks))
        .unwrap_or(Decimal::ZERO);
    let future_demand_14w = rolling_demand(demand, EXPEDITE_DEMAND_WEEKS);
    let future_demand_18w = rolling_demand(demand, EXPEDITE_SUPPLY_WEEKS);

    let transferable_surplus = position.local_source > Decimal::from(units_per_carton);
    let transfer_order = window_weeks.is_some()
        && position.reachable() < future_demand_window
        && transferable_surplus;

    let transit_short = position.transit_35_98d < future_demand_14w;
    let expedite = transit_short && position.production_28_126d > future_demand_18w;
    let prepone = transit_short && position.production_56_168d > position.transit_35_98d;

    let at_risk_margin = if transfer_order {
        let gap = future_demand_window - position.reachable();
        let recoverable = gap.min(position.local_source);
        unit_price
            .map(|price| (recoverable * price).max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    RecommendationRecord {
        transfer_order,
        expedite,
        prepone,
        window_weeks,
        future_demand_window,
        future_demand_14w,
        future_demand_18w,
        at_risk_margin,
    }
}

/// The two warehouse-fulfillment paths an order can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarehouseChannel {
    /// Lighter path through a third-party warehouse.
    ThirdParty,
    /// Heavier direct path.
    Direct,
}

impl WarehouseChannel {
    /// Warehouse-type code used by the buffer lookup table.
    pub fn wh_type(&self) -> &'static str {
        match self {
            WarehouseChannel::ThirdParty => "3PL",
            WarehouseChannel::Direct => "DI",
        }
    }
}

/// Cartons needed for a quantity, rounded up. A missing or zero
/// units-per-carton counts whole units as cartons.
pub fn carton_count(quantity: Qty, units_per_carton: u32) -> u32 {
    let per_carton = Decimal::from(units_per_carton.max(1));
    (quantity / per_carton)
        .ceil()
        .to_u32()
        .unwrap_or(0)
}

/// Route an order to a warehouse channel.
///
/// At or below the carton threshold the order takes the third-party
/// channel; above it the direct channel. Orders originating in a
/// special-routing country always take the third-party channel, regardless
/// of carton count.
pub fn route_order(
    cartons: u32,
    special_routing_origin: bool,
    max_cartons_third_party: u32,
) -> WarehouseChannel {
    if special_routing_origin || cartons <= max_cartons_third_party {
        WarehouseChannel::ThirdParty
    } else {
        WarehouseChannel::Direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flat_demand(per_week: Decimal, weeks: usize) -> Vec<Qty> {
        vec![per_week; weeks]
    }

    #[test]
    fn test_transfer_windows_by_market_family() {
        assert_eq!(transfer_window(&Market::US), Some(10));
        assert_eq!(transfer_window(&Market::CA), Some(10));
        assert_eq!(transfer_window(&Market::EU), Some(7));
        assert_eq!(transfer_window(&Market::UK), Some(7));
        assert_eq!(transfer_window(&Market::MX), None);
    }

    #[test]
    fn test_rolling_demand_truncates_at_series_end() {
        let demand = flat_demand(dec!(10), 5);
        assert_eq!(rolling_demand(&demand, 14), dec!(50));
        assert_eq!(rolling_demand(&demand, 3), dec!(30));
    }

    #[test]
    fn test_transfer_flag_requires_shortage_and_surplus() {
        let demand = flat_demand(dec!(10), 104);
        let position = InventoryPosition {
            fulfillable: dec!(20),
            platform_held: dec!(30),
            inbound_to_platform: dec!(10),
            local_source: dec!(40),
            ..Default::default()
        };
        // 10w demand = 100 > reachable 60, local 40 > carton 10
        let record = evaluate(&Market::US, &position, &demand, 10, Some(dec!(2)));
        assert!(record.transfer_order);
        assert_eq!(record.future_demand_window, dec!(100));
        // min(100 - 60, 40) * 2
        assert_eq!(record.at_risk_margin, dec!(80));
    }

    #[test]
    fn test_transfer_flag_needs_transferable_surplus() {
        let demand = flat_demand(dec!(10), 104);
        let position = InventoryPosition {
            fulfillable: dec!(20),
            local_source: dec!(5),
            ..Default::default()
        };
        // Shortage exists but local source is below one carton.
        let record = evaluate(&Market::US, &position, &demand, 10, Some(dec!(2)));
        assert!(!record.transfer_order);
        assert_eq!(record.at_risk_margin, Decimal::ZERO);
    }

    #[test]
    fn test_window_length_changes_the_outcome() {
        let demand = flat_demand(dec!(10), 104);
        let position = InventoryPosition {
            fulfillable: dec!(80),
            local_source: dec!(50),
            ..Default::default()
        };
        // 10w demand 100 > 80 flags in the US; 7w demand 70 does not in
        // the EU.
        let us = evaluate(&Market::US, &position, &demand, 10, None);
        assert!(us.transfer_order);
        let eu = evaluate(&Market::EU, &position, &demand, 10, None);
        assert_eq!(eu.window_weeks, Some(7));
        assert_eq!(eu.future_demand_window, dec!(70));
        assert!(!eu.transfer_order);
    }

    #[test]
    fn test_unwindowed_market_never_flags_transfer() {
        let demand = flat_demand(dec!(100), 104);
        let position = InventoryPosition {
            local_source: dec!(500),
            ..Default::default()
        };
        let record = evaluate(&Market::BR, &position, &demand, 1, Some(dec!(9)));
        assert!(!record.transfer_order);
        assert_eq!(record.future_demand_window, Decimal::ZERO);
    }

    #[test]
    fn test_expedite_when_transit_is_bottleneck() {
        let demand = flat_demand(dec!(10), 104);
        let position = InventoryPosition {
            transit_35_98d: dec!(100),   // < 14w demand of 140
            production_28_126d: dec!(200), // > 18w demand of 180
            ..Default::default()
        };
        let record = evaluate(&Market::US, &position, &demand, 10, None);
        assert!(record.expedite);
    }

    #[test]
    fn test_no_expedite_without_production_capacity() {
        let demand = flat_demand(dec!(10), 104);
        let position = InventoryPosition {
            transit_35_98d: dec!(100),
            production_28_126d: dec!(150), // <= 18w demand of 180
            ..Default::default()
        };
        let record = evaluate(&Market::US, &position, &demand, 10, None);
        assert!(!record.expedite);
    }

    #[test]
    fn test_prepone_when_late_production_exceeds_transit() {
        let demand = flat_demand(dec!(10), 104);
        let position = InventoryPosition {
            transit_35_98d: dec!(100),
            production_56_168d: dec!(120),
            ..Default::default()
        };
        let record = evaluate(&Market::US, &position, &demand, 10, None);
        assert!(record.prepone);
        assert!(!record.expedite);
    }

    #[test]
    fn test_no_margin_without_price() {
        let demand = flat_demand(dec!(10), 104);
        let position = InventoryPosition {
            local_source: dec!(40),
            ..Default::default()
        };
        let record = evaluate(&Market::US, &position, &demand, 10, None);
        assert!(record.transfer_order);
        assert_eq!(record.at_risk_margin, Decimal::ZERO);
    }

    #[test]
    fn test_carton_count_rounds_up() {
        assert_eq!(carton_count(dec!(40), 10), 4);
        assert_eq!(carton_count(dec!(41), 10), 5);
        assert_eq!(carton_count(dec!(7), 0), 7);
    }

    #[test]
    fn test_small_order_routes_to_third_party() {
        assert_eq!(
            route_order(4, false, 5),
            WarehouseChannel::ThirdParty
        );
        assert_eq!(route_order(5, false, 5), WarehouseChannel::ThirdParty);
    }

    #[test]
    fn test_large_order_routes_direct() {
        assert_eq!(route_order(20, false, 5), WarehouseChannel::Direct);
    }

    #[test]
    fn test_special_routing_overrides_threshold() {
        // 20 cartons would route direct, but the origin wins.
        assert_eq!(route_order(20, true, 5), WarehouseChannel::ThirdParty);
    }

    #[test]
    fn test_channel_wh_type_codes() {
        assert_eq!(WarehouseChannel::ThirdParty.wh_type(), "3PL");
        assert_eq!(WarehouseChannel::Direct.wh_type(), "DI");
    }
}
