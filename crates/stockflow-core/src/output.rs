//! Wide result-table rendering.
//!
//! One row per Reference; for every horizon week three metric columns
//! labeled `CW{week:02}-{year}_{suffix}`. The label grammar is a
//! compatibility surface consumed by downstream spreadsheets and must be
//! reproduced exactly regardless of internal representation.

use rust_decimal::Decimal;

use crate::calendar::CalWeek;
use crate::engine::ResultRow;

pub const COL_INVENTORY_START: &str = "inventory_start";
pub const COL_INVENTORY_END: &str = "inventory_end";
pub const COL_SALES_MISSED: &str = "sales_missed_w";

/// Column order of the wide table: identity, weekly metrics in week order,
/// then the scalar tail.
pub fn header(weeks: &[CalWeek]) -> Vec<String> {
    let mut columns = vec![
        "reference".to_string(),
        "product_id".to_string(),
        "marketplace".to_string(),
        "active".to_string(),
    ];
    for week in weeks {
        columns.push(week.column(COL_INVENTORY_START));
        columns.push(week.column(COL_INVENTORY_END));
        columns.push(week.column(COL_SALES_MISSED));
    }
    columns.extend(
        [
            "first_stockout_week",
            "runway_days",
            "unit_price",
            "revenue_miss_until_cutoff",
            "post_stockout_revenue",
            "transfer_order_flag",
            "expedite_flag",
            "prepone_flag",
            "at_risk_margin",
            "future_demand_window",
            "future_demand_14w",
            "future_demand_18w",
        ]
        .map(String::from),
    );
    columns
}

/// One record, aligned with [`header`].
pub fn record(row: &ResultRow) -> Vec<String> {
    let mut values = vec![
        row.reference.key.clone(),
        row.reference.product_id.clone(),
        row.reference.market.code().to_string(),
        row.active.to_string(),
    ];
    for state in &row.trajectory.weeks {
        values.push(state.inventory_start.to_string());
        values.push(state.inventory_end.to_string());
        values.push(state.sales_missed.to_string());
    }
    values.push(
        row.first_stockout_week
            .map(|w| w.label())
            .unwrap_or_default(),
    );
    values.push(row.revenue.runway_days.to_string());
    values.push(optional(row.revenue.unit_price));
    values.push(optional(row.revenue.revenue_miss_until_cutoff));
    values.push(optional(row.revenue.post_stockout_revenue));
    values.push(row.recommendation.transfer_order.to_string());
    values.push(row.recommendation.expedite.to_string());
    values.push(row.recommendation.prepone.to_string());
    values.push(row.recommendation.at_risk_margin.to_string());
    values.push(row.recommendation.future_demand_window.to_string());
    values.push(row.recommendation.future_demand_14w.to_string());
    values.push(row.recommendation.future_demand_18w.to_string());
    values
}

fn optional(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Parse a weekly column label back into its week and metric suffix.
pub fn parse_week_column(label: &str) -> Option<(CalWeek, &str)> {
    let rest = label.strip_prefix("CW")?;
    let week: u32 = rest.get(..2)?.parse().ok()?;
    let rest = rest.get(2..)?.strip_prefix('-')?;
    let year: i32 = rest.get(..4)?.parse().ok()?;
    let suffix = rest.get(4..)?.strip_prefix('_')?;
    Some((CalWeek { year, week }, suffix))
}
