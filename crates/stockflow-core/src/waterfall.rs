//! Inventory waterfall engine.
//!
//! Walks the 104 weekly buckets of one Reference strictly in order,
//! carrying inventory state forward:
//! - signed supply and inbound shipments cover demand;
//! - unsigned supply builds end-of-week inventory but never covers a
//!   stockout;
//! - week w+1 starts where week w ended.
//!
//! The projection is a pure function of (opening inventory, demand series,
//! supply buckets). All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::Horizon;
use crate::error::StockflowError;
use crate::types::Qty;
use crate::StockflowResult;

/// Supply quantities bucketed to one horizon week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSupply {
    /// Inbound shipment units arriving this week.
    pub inbound: Qty,
    /// Signed open-order units arriving this week.
    pub signed: Qty,
    /// Unsigned open-order units arriving this week.
    pub unsigned: Qty,
}

/// Inventory state of one Reference for one week.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeekState {
    pub inventory_start: Qty,
    pub inventory_end: Qty,
    pub sales_missed: Qty,
}

/// The projected trajectory of one Reference across the horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub weeks: Vec<WeekState>,
    /// Index of the earliest week with positive sales-missed. Set once,
    /// never overwritten.
    pub first_stockout: Option<usize>,
}

impl Trajectory {
    pub fn total_sales_missed(&self) -> Qty {
        self.weeks.iter().map(|w| w.sales_missed).sum()
    }
}

/// Project one Reference across the horizon.
///
/// `demand` and `supply` must be aligned to the horizon. Later weeks depend
/// on earlier results; the fold is strictly sequential.
pub fn project(
    horizon: &Horizon,
    opening_inventory: Qty,
    demand: &[Qty],
    supply: &[WeekSupply],
) -> StockflowResult<Trajectory> {
    if demand.len() != horizon.len() {
        return Err(StockflowError::InvalidInput {
            field: "demand".into(),
            reason: format!(
                "series length {} does not match horizon length {}",
                demand.len(),
                horizon.len()
            ),
        });
    }
    if supply.len() != horizon.len() {
        return Err(StockflowError::InvalidInput {
            field: "supply".into(),
            reason: format!(
                "series length {} does not match horizon length {}",
                supply.len(),
                horizon.len()
            ),
        });
    }

    let mut weeks = Vec::with_capacity(horizon.len());
    let mut first_stockout = None;
    let mut inventory_start = opening_inventory.max(Decimal::ZERO);

    for w in 0..horizon.len() {
        let available = inventory_start + supply[w].inbound + supply[w].signed;
        let sales_missed = (demand[w] - available).max(Decimal::ZERO);
        let inventory_end = (available + supply[w].unsigned - demand[w]).max(Decimal::ZERO);

        if first_stockout.is_none() && sales_missed > Decimal::ZERO {
            first_stockout = Some(w);
        }

        weeks.push(WeekState {
            inventory_start,
            inventory_end,
            sales_missed,
        });
        inventory_start = inventory_end;
    }

    Ok(Trajectory {
        weeks,
        first_stockout,
    })
}
