//! Revenue-at-risk metrics derived from a projected trajectory.
//!
//! Two figures per Reference: cumulative revenue missed up to the
//! configured calendar cutoff, and revenue missed from the first stockout
//! week onward. A Reference with no resolvable unit price is excluded from
//! these two figures only; everything else is still computed.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::Horizon;
use crate::types::Money;
use crate::waterfall::Trajectory;
use crate::StockflowResult;

/// Resolve the unit price for a Reference.
///
/// The benchmark price wins when present and positive; otherwise the
/// trailing realized average. Neither -> None.
pub fn resolve_unit_price(
    benchmark: Option<Money>,
    trailing_avg: Option<Money>,
) -> Option<Money> {
    match benchmark {
        Some(price) if price > Decimal::ZERO => Some(price),
        _ => trailing_avg.filter(|price| *price > Decimal::ZERO),
    }
}

/// Revenue exposure of one Reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueRisk {
    pub unit_price: Option<Money>,
    /// Sales missed in horizon weeks up to the cutoff year, priced.
    pub revenue_miss_until_cutoff: Option<Money>,
    /// Sales missed from the first stockout week onward, priced.
    pub post_stockout_revenue: Option<Money>,
    /// Days until the projected stockout; spans the horizon when no
    /// stockout is projected.
    pub runway_days: i64,
}

pub fn assess(
    trajectory: &Trajectory,
    horizon: &Horizon,
    unit_price: Option<Money>,
    cutoff_year: i32,
    run_date: NaiveDate,
) -> StockflowResult<RevenueRisk> {
    let runway_days = match trajectory.first_stockout {
        Some(index) => {
            let week = horizon.weeks()[index];
            (week.monday()? - run_date).num_days().max(0)
        }
        None => {
            let end = horizon.last().monday()? + Duration::days(6);
            (end - run_date).num_days().max(0)
        }
    };

    let Some(price) = unit_price else {
        return Ok(RevenueRisk {
            unit_price: None,
            revenue_miss_until_cutoff: None,
            post_stockout_revenue: None,
            runway_days,
        });
    };

    let mut missed_until_cutoff = Decimal::ZERO;
    let mut missed_after_stockout = Decimal::ZERO;
    for (index, week) in horizon.weeks().iter().enumerate() {
        if week.year > cutoff_year {
            break;
        }
        let missed = trajectory.weeks[index].sales_missed;
        missed_until_cutoff += missed;
        if matches!(trajectory.first_stockout, Some(first) if index >= first) {
            missed_after_stockout += missed;
        }
    }

    Ok(RevenueRisk {
        unit_price: Some(price),
        revenue_miss_until_cutoff: Some(missed_until_cutoff * price),
        post_stockout_revenue: Some(missed_after_stockout * price),
        runway_days,
    })
}
