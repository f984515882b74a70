//! Batch orchestration: materialized source tables + configuration in,
//! result rows + data-quality report out.
//!
//! The engine performs the per-Reference join itself, then runs the
//! pipeline for every Reference in sorted key order. References have no
//! cross-Reference dependencies, so processing order only affects row
//! order, never values; re-running on identical input yields identical
//! output.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::calendar::{CalWeek, Horizon};
use crate::config::EngineConfig;
use crate::demand::apportion;
use crate::identity::{derive_reference, standardize_market};
use crate::quality::DataQualityReport;
use crate::recommend::{self, InventoryPosition, RecommendationRecord};
use crate::revenue::{self, RevenueRisk};
use crate::supply::leadtime::{self, InboundDates, LeadTimeComponent, LeadTimeProfile};
use crate::supply::{classify, SupplyEvent, SupplyKind};
use crate::tables::{MasterRow, SourceTables, VendorRow};
use crate::types::{Money, Qty, Reference};
use crate::waterfall::{self, Trajectory, WeekSupply};
use crate::StockflowResult;

/// One result row per Reference.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub reference: Reference,
    /// Whether the product-market appears on the active list.
    pub active: bool,
    pub trajectory: Trajectory,
    pub first_stockout_week: Option<CalWeek>,
    pub revenue: RevenueRisk,
    pub recommendation: RecommendationRecord,
}

/// Run-level aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub references: usize,
    pub stockout_references: usize,
    pub total_demand: Qty,
    pub total_sales_missed: Qty,
    /// `(total demand - total missed) / total demand`, in percent.
    pub demand_coverage_pct: Decimal,
}

/// The complete output of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionOutput {
    /// The horizon the weekly columns of every row align to.
    pub weeks: Vec<CalWeek>,
    pub rows: Vec<ResultRow>,
    pub report: DataQualityReport,
    pub summary: RunSummary,
}

/// Execute a full projection run.
///
/// Fails only on schema-level problems (missing required tables, invalid
/// configuration); every data-level problem is recoverable and lands in
/// the data-quality report instead.
pub fn run(tables: &SourceTables, config: &EngineConfig) -> StockflowResult<ProjectionOutput> {
    tables.validate()?;
    config.validate()?;

    let horizon = Horizon::starting(config.run_date)?;
    let profile = config.lead_time_profile();
    let mut report = DataQualityReport::new();

    let master = MasterIndex::build(&tables.master);
    let vendors: HashMap<&str, &VendorRow> = tables
        .vendors
        .iter()
        .map(|v| (v.vendor_id.as_str(), v))
        .collect();
    let product_vendor: HashMap<&str, &str> = tables
        .product_vendors
        .iter()
        .map(|m| (m.product_id.as_str(), m.vendor_id.as_str()))
        .collect();
    let status_overrides: HashMap<(&str, &str), &str> = tables
        .delivery_performance
        .iter()
        .map(|d| {
            (
                (d.order_number.as_str(), d.line_id.as_str()),
                d.status.as_str(),
            )
        })
        .collect();

    let price_index = build_price_index(tables, &mut report);
    let active_set = build_active_set(tables, &mut report);

    let demand_series = build_demand_series(tables, &horizon, &master, &mut report);
    let (opening, positions) = build_inventory(tables, &master, &mut report);
    let events = build_supply_events(
        tables,
        config,
        &profile,
        &master,
        &vendors,
        &product_vendor,
        &status_overrides,
        &mut report,
    );
    let mut supply_buckets = crate::supply::bucket(&events, &horizon);

    let mut references: BTreeSet<Reference> = BTreeSet::new();
    references.extend(demand_series.keys().cloned());
    references.extend(opening.keys().cloned());
    references.extend(positions.keys().cloned());
    references.extend(supply_buckets.keys().cloned());

    let empty_supply = vec![WeekSupply::default(); horizon.len()];
    let mut rows = Vec::with_capacity(references.len());
    let mut total_demand = Decimal::ZERO;
    let mut total_sales_missed = Decimal::ZERO;
    let mut stockout_references = 0usize;

    for reference in references {
        let demand = demand_series
            .get(&reference)
            .cloned()
            .unwrap_or_else(|| horizon.zeroed());
        let supply = supply_buckets
            .remove(&reference)
            .unwrap_or_else(|| empty_supply.clone());
        let opening_units = opening.get(&reference).copied().unwrap_or(Decimal::ZERO);

        let trajectory = waterfall::project(&horizon, opening_units, &demand, &supply)?;

        let unit_price = price_index.get(&reference.key).copied().flatten();
        if unit_price.is_none() {
            report.warn_unpriced(&reference.key);
        }
        let risk = revenue::assess(
            &trajectory,
            &horizon,
            unit_price,
            config.cutoff_year,
            config.run_date,
        )?;

        let units_per_carton = master
            .find(&reference.product_id)
            .and_then(|m| m.units_per_carton)
            .unwrap_or(1);
        let position = positions.get(&reference).copied().unwrap_or_default();
        let recommendation = recommend::evaluate(
            &reference.market,
            &position,
            &demand,
            units_per_carton,
            unit_price,
        );

        total_demand += demand.iter().copied().sum::<Decimal>();
        total_sales_missed += trajectory.total_sales_missed();
        if trajectory.first_stockout.is_some() {
            stockout_references += 1;
        }

        rows.push(ResultRow {
            active: active_set.contains(&reference.key),
            first_stockout_week: trajectory.first_stockout.map(|i| horizon.weeks()[i]),
            reference,
            trajectory,
            revenue: risk,
            recommendation,
        });
    }

    let demand_coverage_pct = if total_demand > Decimal::ZERO {
        (((total_demand - total_sales_missed) / total_demand) * Decimal::from(100)).round_dp(2)
    } else {
        Decimal::from(100)
    };

    Ok(ProjectionOutput {
        weeks: horizon.weeks().to_vec(),
        summary: RunSummary {
            references: rows.len(),
            stockout_references,
            total_demand,
            total_sales_missed,
            demand_coverage_pct,
        },
        rows,
        report,
    })
}

// ---------------------------------------------------------------------------
// Join helpers
// ---------------------------------------------------------------------------

struct MasterIndex<'a> {
    by_internal: HashMap<&'a str, &'a MasterRow>,
    by_product: HashMap<&'a str, &'a MasterRow>,
}

impl<'a> MasterIndex<'a> {
    fn build(rows: &'a [MasterRow]) -> MasterIndex<'a> {
        let mut by_internal = HashMap::new();
        let mut by_product = HashMap::new();
        for row in rows {
            by_internal.entry(row.internal_id.as_str()).or_insert(row);
            if let Some(product_id) = non_empty(row.product_id.as_deref()) {
                by_product.entry(product_id).or_insert(row);
            }
        }
        MasterIndex {
            by_internal,
            by_product,
        }
    }

    fn find(&self, id: &str) -> Option<&'a MasterRow> {
        self.by_product
            .get(id)
            .or_else(|| self.by_internal.get(id))
            .copied()
    }

    fn matches(&self, product_id: Option<&str>, internal_id: Option<&str>) -> bool {
        non_empty(product_id).is_some_and(|id| self.find(id).is_some())
            || non_empty(internal_id).is_some_and(|id| self.find(id).is_some())
    }

    fn product_id_for(&self, internal_id: Option<&str>) -> Option<&'a str> {
        let internal = non_empty(internal_id)?;
        let row = self.by_internal.get(internal)?;
        non_empty(row.product_id.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Standardize the market and derive the Reference for one row.
///
/// With `require_master` set, rows whose product has no master-data
/// counterpart are excluded with a warning, never an error.
fn normalize(
    product_id: Option<&str>,
    internal_id: Option<&str>,
    raw_market: &str,
    table: &'static str,
    master: &MasterIndex<'_>,
    require_master: bool,
    report: &mut DataQualityReport,
) -> Option<Reference> {
    let market = standardize_market(raw_market);
    if !market.is_known() {
        report.warn_unknown_market(table, raw_market);
    }

    if require_master && !master.matches(product_id, internal_id) {
        let shown = non_empty(product_id)
            .or_else(|| non_empty(internal_id))
            .unwrap_or("<no id>");
        report.warn_unmatched(table, shown);
        return None;
    }

    let resolved_product = non_empty(product_id).or_else(|| master.product_id_for(internal_id));
    derive_reference(resolved_product, internal_id, &market)
}

/// Clamp a primary quantity: missing or negative becomes zero with a
/// warning.
fn clamp_quantity(
    quantity: Option<Qty>,
    table: &'static str,
    key: &str,
    report: &mut DataQualityReport,
) -> Qty {
    match quantity {
        Some(q) if q >= Decimal::ZERO => q,
        _ => {
            report.warn_clamped(table, key);
            Decimal::ZERO
        }
    }
}

fn band(quantity: Option<Qty>) -> Qty {
    quantity.unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
}

fn build_price_index(
    tables: &SourceTables,
    report: &mut DataQualityReport,
) -> HashMap<String, Option<Money>> {
    let mut index = HashMap::new();
    for row in &tables.prices {
        let market = standardize_market(&row.marketplace);
        if !market.is_known() {
            report.warn_unknown_market("prices", &row.marketplace);
        }
        let Some(reference) = derive_reference(Some(row.product_id.as_str()), None, &market) else {
            continue;
        };
        let resolved =
            revenue::resolve_unit_price(row.benchmark_price, row.trailing_avg_price);
        index.entry(reference.key).or_insert(resolved);
    }
    index
}

fn build_active_set(tables: &SourceTables, report: &mut DataQualityReport) -> HashSet<String> {
    let mut set = HashSet::new();
    for row in &tables.active_products {
        let market = standardize_market(&row.marketplace);
        if !market.is_known() {
            report.warn_unknown_market("active_products", &row.marketplace);
        }
        if let Some(reference) = derive_reference(
            row.product_id.as_deref(),
            row.internal_id.as_deref(),
            &market,
        ) {
            set.insert(reference.key);
        }
    }
    set
}

fn build_demand_series(
    tables: &SourceTables,
    horizon: &Horizon,
    master: &MasterIndex<'_>,
    report: &mut DataQualityReport,
) -> BTreeMap<Reference, Vec<Qty>> {
    let mut series: BTreeMap<Reference, Vec<Qty>> = BTreeMap::new();
    for row in &tables.demand {
        let Some(reference) = normalize(
            row.product_id.as_deref(),
            Some(row.internal_id.as_str()),
            &row.marketplace,
            "demand",
            master,
            true,
            report,
        ) else {
            continue;
        };
        let quantity = clamp_quantity(row.quantity, "demand", &reference.key, report);
        let weekly = series
            .entry(reference)
            .or_insert_with(|| horizon.zeroed());
        for (week, share) in apportion(row.month, quantity) {
            if let Some(index) = horizon.index_of(&week) {
                weekly[index] += share;
            }
        }
    }
    series
}

type OpeningInventory = BTreeMap<Reference, Qty>;
type Positions = BTreeMap<Reference, InventoryPosition>;

fn build_inventory(
    tables: &SourceTables,
    master: &MasterIndex<'_>,
    report: &mut DataQualityReport,
) -> (OpeningInventory, Positions) {
    let mut opening: OpeningInventory = BTreeMap::new();
    let mut positions: Positions = BTreeMap::new();
    for row in &tables.inventory {
        let Some(reference) = normalize(
            row.product_id.as_deref(),
            row.internal_id.as_deref(),
            &row.marketplace,
            "inventory",
            master,
            false,
            report,
        ) else {
            continue;
        };
        let units = clamp_quantity(row.total_units, "inventory", &reference.key, report);
        *opening.entry(reference.clone()).or_insert(Decimal::ZERO) += units;

        let position = positions.entry(reference).or_default();
        position.fulfillable += band(row.fulfillable);
        position.platform_held += band(row.platform_held);
        position.inbound_to_platform += band(row.inbound_to_platform);
        position.local_source += band(row.local_source);
        position.transit_35_98d += band(row.transit_35_98d);
        position.production_28_126d += band(row.production_28_126d);
        position.production_56_168d += band(row.production_56_168d);
    }
    (opening, positions)
}

#[allow(clippy::too_many_arguments)]
fn build_supply_events(
    tables: &SourceTables,
    config: &EngineConfig,
    profile: &LeadTimeProfile,
    master: &MasterIndex<'_>,
    vendors: &HashMap<&str, &VendorRow>,
    product_vendor: &HashMap<&str, &str>,
    status_overrides: &HashMap<(&str, &str), &str>,
    report: &mut DataQualityReport,
) -> Vec<SupplyEvent> {
    let mut events = Vec::new();

    for row in &tables.open_orders {
        let Some(reference) = normalize(
            row.product_id.as_deref(),
            Some(row.internal_id.as_str()),
            &row.marketplace,
            "open_orders",
            master,
            true,
            report,
        ) else {
            continue;
        };
        let quantity = clamp_quantity(row.quantity, "open_orders", &reference.key, report);

        let status = status_overrides
            .get(&(row.order_number.as_str(), row.line_id.as_str()))
            .copied()
            .unwrap_or(row.status.as_str());
        let (classification, stage) = classify(status);
        if stage.is_none() {
            report.warn_unknown_stage(&row.order_number, status);
        }

        let production_days = master
            .find(&reference.product_id)
            .and_then(|m| m.production_lead_time_days);
        let ship_region = ship_region(
            config,
            vendors,
            product_vendor,
            &reference.product_id,
            row.vendor_name.as_deref(),
        );
        let resolved = leadtime::resolve(
            profile,
            production_days,
            ship_region,
            reference.market.code(),
            row.wh_type.as_deref(),
        );
        for component in &resolved.defaulted {
            match component {
                LeadTimeComponent::Transport => {
                    report.warn_lead_time_default(&reference.key, "transport");
                }
                LeadTimeComponent::Buffer => {
                    report.warn_lead_time_default(&reference.key, "buffer");
                }
                LeadTimeComponent::Production => {}
            }
        }

        let anchor = row.confirmed_ready_date.unwrap_or(config.run_date);
        let arrival = leadtime::arrival_week(anchor, resolved.total(), config.run_date);
        events.push(SupplyEvent {
            reference,
            quantity,
            kind: SupplyKind::Order(classification),
            arrival,
        });
    }

    for row in &tables.inbound {
        let Some(reference) = normalize(
            row.product_id.as_deref(),
            Some(row.internal_id.as_str()),
            &row.marketplace,
            "inbound",
            master,
            true,
            report,
        ) else {
            continue;
        };
        let quantity = clamp_quantity(row.quantity, "inbound", &reference.key, report);

        let ship_region = ship_region(
            config,
            vendors,
            product_vendor,
            &reference.product_id,
            row.vendor_name.as_deref(),
        );
        let market_code = reference.market.code();
        let buffer_days = profile.market_buffer_days(market_code, ship_region);
        let transport_days = ship_region
            .and_then(|region| profile.transport_days(region, market_code))
            .unwrap_or(leadtime::DEFAULT_TRANSPORT_DAYS);

        let dates = InboundDates {
            carrier_expected: row.carrier_expected_date,
            actual_arrival: row.actual_arrival_date,
            movement: row.movement_date,
            confirmed_ready: row.confirmed_ready_date,
        };
        let (arrival_date, _source) =
            leadtime::resolve_inbound_arrival(dates, buffer_days, transport_days, config.run_date);
        events.push(SupplyEvent {
            reference,
            quantity,
            kind: SupplyKind::Inbound,
            arrival: CalWeek::from_date(arrival_date),
        });
    }

    events
}

/// Ship region for a supply row: the product's mapped vendor wins, else a
/// vendor matched by name prefix, resolved to a region via configuration.
fn ship_region<'a>(
    config: &'a EngineConfig,
    vendors: &HashMap<&str, &'a VendorRow>,
    product_vendor: &HashMap<&str, &str>,
    product_id: &str,
    vendor_name: Option<&str>,
) -> Option<&'a str> {
    let vendor = product_vendor
        .get(product_id)
        .and_then(|id| vendors.get(id))
        .or_else(|| {
            let name = non_empty(vendor_name)?;
            let prefix: String = name.chars().take(5).collect();
            vendors.get(prefix.as_str())
        })?;
    let country = non_empty(vendor.country.as_deref())?;
    config.region_for_country(country)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HORIZON_WEEKS;
    use crate::tables::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run_date() -> NaiveDate {
        date(2026, 8, 5)
    }

    fn config() -> EngineConfig {
        EngineConfig::with_defaults(run_date(), 2026)
    }

    fn master_row(internal: &str, product: &str) -> MasterRow {
        MasterRow {
            internal_id: internal.into(),
            product_id: Some(product.into()),
            production_lead_time_days: Some(45),
            units_per_carton: Some(10),
            carton_weight_kg: None,
            carton_volume: None,
            size_tier: None,
            preferred_vendor: None,
        }
    }

    fn inventory_row(market: &str, product: &str, units: Decimal) -> InventoryRow {
        InventoryRow {
            marketplace: market.into(),
            internal_id: None,
            product_id: Some(product.into()),
            total_units: Some(units),
            fulfillable: None,
            platform_held: None,
            inbound_to_platform: None,
            local_source: None,
            transit_35_98d: None,
            production_28_126d: None,
            production_56_168d: None,
        }
    }

    fn demand_row(market: &str, internal: &str, product: &str, month: NaiveDate, qty: Decimal) -> DemandRow {
        DemandRow {
            marketplace: market.into(),
            internal_id: internal.into(),
            product_id: Some(product.into()),
            month,
            quantity: Some(qty),
        }
    }

    fn sample_tables() -> SourceTables {
        SourceTables {
            demand: vec![demand_row("US", "R-1", "B0A", date(2026, 9, 1), dec!(120))],
            inventory: vec![inventory_row("US", "B0A", dec!(40))],
            master: vec![master_row("R-1", "B0A")],
            ..Default::default()
        }
    }

    #[test]
    fn test_run_produces_one_row_per_reference() {
        let out = run(&sample_tables(), &config()).unwrap();
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].reference.key, "B0AUS");
        assert_eq!(out.rows[0].trajectory.weeks.len(), HORIZON_WEEKS);
        assert_eq!(out.weeks.len(), HORIZON_WEEKS);
    }

    #[test]
    fn test_run_fails_without_required_tables() {
        let mut tables = sample_tables();
        tables.inventory.clear();
        assert!(run(&tables, &config()).is_err());
    }

    #[test]
    fn test_opening_inventory_feeds_week_zero() {
        let out = run(&sample_tables(), &config()).unwrap();
        assert_eq!(out.rows[0].trajectory.weeks[0].inventory_start, dec!(40));
    }

    #[test]
    fn test_unmatched_demand_row_is_excluded_not_fatal() {
        let mut tables = sample_tables();
        tables
            .demand
            .push(demand_row("US", "R-404", "", date(2026, 9, 1), dec!(50)));
        // Row with an id absent from master data: excluded, warned.
        let out = run(&tables, &config()).unwrap();
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.report.unmatched_references.len(), 1);
        assert_eq!(out.report.unmatched_references[0].key, "R-404");
    }

    #[test]
    fn test_unknown_market_passes_through_with_warning() {
        let mut tables = sample_tables();
        tables.demand.push(demand_row(
            "ZA",
            "R-1",
            "B0A",
            date(2026, 9, 1),
            dec!(10),
        ));
        let out = run(&tables, &config()).unwrap();
        assert!(out.rows.iter().any(|r| r.reference.key == "B0AZA"));
        assert_eq!(out.report.unknown_markets.len(), 1);
        assert_eq!(out.report.unknown_markets[0].code, "ZA");
    }

    #[test]
    fn test_negative_quantity_clamps_with_warning() {
        let mut tables = sample_tables();
        tables.demand[0].quantity = Some(dec!(-5));
        let out = run(&tables, &config()).unwrap();
        assert_eq!(out.report.clamped_quantities.len(), 1);
        assert_eq!(out.rows[0].trajectory.total_sales_missed(), Decimal::ZERO);
    }

    fn order_row(order_number: &str, status: &str, qty: Decimal) -> OpenOrderRow {
        OpenOrderRow {
            order_number: order_number.into(),
            line_id: "1".into(),
            internal_id: "R-1".into(),
            product_id: Some("B0A".into()),
            marketplace: "US".into(),
            status: status.into(),
            quantity: Some(qty),
            confirmed_ready_date: Some(run_date()),
            wh_type: Some("3PL".into()),
            vendor_name: None,
        }
    }

    #[test]
    fn test_unknown_stage_classifies_unsigned_and_warns() {
        let mut tables = sample_tables();
        tables.demand[0].quantity = Some(Decimal::ZERO);
        tables
            .open_orders
            .push(order_row("PO-9", "42. Mystery Stage", dec!(30)));

        let out = run(&tables, &config()).unwrap();
        assert_eq!(out.report.unknown_stages.len(), 1);
        assert_eq!(out.report.unknown_stages[0].order_number, "PO-9");
        // Run date + the 159-day resolved lead time lands in CW02-2027,
        // horizon index 23: the unsigned units build end-of-week
        // inventory there.
        let weeks = &out.rows[0].trajectory.weeks;
        assert_eq!(weeks[22].inventory_end, dec!(40));
        assert_eq!(weeks[23].inventory_end, dec!(70));
    }

    #[test]
    fn test_status_override_supersedes_raw_status() {
        // Demand 310 over January 2027 peaks in the same week the order
        // arrives (CW02-2027); only a signed order covers that week's miss.
        let mut unsigned = sample_tables();
        unsigned.demand[0] = demand_row("US", "R-1", "B0A", date(2027, 1, 15), dec!(310));
        unsigned
            .open_orders
            .push(order_row("PO-1", "09. Under Production", dec!(30)));

        let mut corrected = unsigned.clone();
        corrected.delivery_performance.push(DeliveryPerformanceRow {
            order_number: "PO-1".into(),
            line_id: "1".into(),
            status: "21. FOB Pickup Pending".into(),
        });

        let base = run(&unsigned, &config()).unwrap();
        let out = run(&corrected, &config()).unwrap();
        assert_eq!(base.rows[0].trajectory.total_sales_missed(), dec!(270));
        assert_eq!(out.rows[0].trajectory.total_sales_missed(), dec!(240));
    }

    #[test]
    fn test_demand_coverage_summary() {
        let out = run(&sample_tables(), &config()).unwrap();
        assert_eq!(out.summary.references, 1);
        assert_eq!(out.summary.total_demand, dec!(120));
        // 40 on hand against 120 demanded: 80 missed, 33.33% covered.
        assert_eq!(out.summary.total_sales_missed, dec!(80));
        assert_eq!(out.summary.demand_coverage_pct, dec!(33.33));
        assert_eq!(out.summary.stockout_references, 1);
    }

    #[test]
    fn test_run_is_deterministic() {
        let tables = sample_tables();
        let a = serde_json::to_string(&run(&tables, &config()).unwrap()).unwrap();
        let b = serde_json::to_string(&run(&tables, &config()).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_active_flag_from_active_list() {
        let mut tables = sample_tables();
        tables.active_products.push(ActiveProductRow {
            internal_id: None,
            product_id: Some("B0A".into()),
            marketplace: "US".into(),
        });
        let out = run(&tables, &config()).unwrap();
        assert!(out.rows[0].active);
    }

    #[test]
    fn test_unpriced_reference_warned_but_projected() {
        let out = run(&sample_tables(), &config()).unwrap();
        assert_eq!(out.report.unpriced_references, vec!["B0AUS".to_string()]);
        assert!(out.rows[0].revenue.revenue_miss_until_cutoff.is_none());
        assert!(out.rows[0].first_stockout_week.is_some());
    }

    #[test]
    fn test_priced_reference_gets_revenue_metrics() {
        let mut tables = sample_tables();
        tables.prices.push(PriceRow {
            product_id: "B0A".into(),
            marketplace: "US".into(),
            benchmark_price: Some(dec!(25)),
            trailing_avg_price: None,
        });
        let out = run(&tables, &config()).unwrap();
        let revenue = &out.rows[0].revenue;
        assert_eq!(revenue.unit_price, Some(dec!(25)));
        // All 80 missed units fall before the 2026 cutoff.
        assert_eq!(revenue.revenue_miss_until_cutoff, Some(dec!(2000)));
        assert!(out.report.unpriced_references.is_empty());
    }
}
