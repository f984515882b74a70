//! Supply commitments: stage classification, lead-time resolution, and
//! bucketing of resolved events onto the horizon.

pub mod leadtime;
pub mod stage;

pub use leadtime::{LeadTimeProfile, ResolvedLeadTime};
pub use stage::{classify, Classification, PoStage};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calendar::{CalWeek, Horizon};
use crate::types::{Qty, Reference};
use crate::waterfall::WeekSupply;

/// What kind of incoming inventory an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyKind {
    /// A shipment already underway.
    Inbound,
    /// An open order line, trusted per its stage classification.
    Order(Classification),
}

/// A unit of incoming inventory with a resolved arrival week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyEvent {
    pub reference: Reference,
    pub quantity: Qty,
    pub kind: SupplyKind,
    pub arrival: CalWeek,
}

/// Bucket resolved events into per-Reference weekly supply vectors aligned
/// to the horizon. Events arriving beyond the horizon are dropped.
pub fn bucket(
    events: &[SupplyEvent],
    horizon: &Horizon,
) -> HashMap<Reference, Vec<WeekSupply>> {
    let mut buckets: HashMap<Reference, Vec<WeekSupply>> = HashMap::new();
    for event in events {
        let Some(index) = horizon.index_of(&event.arrival) else {
            continue;
        };
        let series = buckets
            .entry(event.reference.clone())
            .or_insert_with(|| vec![WeekSupply::default(); horizon.len()]);
        let slot = &mut series[index];
        match event.kind {
            SupplyKind::Inbound => slot.inbound += event.quantity,
            SupplyKind::Order(Classification::Signed) => slot.signed += event.quantity,
            SupplyKind::Order(Classification::Unsigned) => slot.unsigned += event.quantity,
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Market;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn horizon() -> Horizon {
        Horizon::starting(NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()).unwrap()
    }

    fn reference() -> Reference {
        Reference::new("B0A", Market::US)
    }

    #[test]
    fn test_bucket_accumulates_by_kind() {
        let h = horizon();
        let week = h.weeks()[2];
        let events = vec![
            SupplyEvent {
                reference: reference(),
                quantity: dec!(10),
                kind: SupplyKind::Order(Classification::Signed),
                arrival: week,
            },
            SupplyEvent {
                reference: reference(),
                quantity: dec!(5),
                kind: SupplyKind::Order(Classification::Signed),
                arrival: week,
            },
            SupplyEvent {
                reference: reference(),
                quantity: dec!(7),
                kind: SupplyKind::Order(Classification::Unsigned),
                arrival: week,
            },
            SupplyEvent {
                reference: reference(),
                quantity: dec!(3),
                kind: SupplyKind::Inbound,
                arrival: week,
            },
        ];

        let buckets = bucket(&events, &h);
        let series = &buckets[&reference()];
        assert_eq!(series[2].signed, dec!(15));
        assert_eq!(series[2].unsigned, dec!(7));
        assert_eq!(series[2].inbound, dec!(3));
        assert_eq!(series[3], WeekSupply::default());
    }

    #[test]
    fn test_bucket_drops_events_beyond_horizon() {
        let h = horizon();
        let beyond = h.last().succ().unwrap();
        let events = vec![SupplyEvent {
            reference: reference(),
            quantity: dec!(10),
            kind: SupplyKind::Inbound,
            arrival: beyond,
        }];
        assert!(bucket(&events, &h).is_empty());
    }
}
