//! Total replenishment lead time per supply commitment.
//!
//! `resolve` is additive over five components; every lookup miss falls back
//! to a documented default constant, so resolution never fails. Inbound
//! shipment lines do not use the additive formula: their arrival date comes
//! from an explicit fallback chain over the dates the carrier feed provides.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calendar::CalWeek;
use crate::types::Days;

/// Production lead time when master data carries none.
pub const DEFAULT_PRODUCTION_DAYS: Days = 45;
/// Transport lead time for an unconfigured region pair.
pub const DEFAULT_TRANSPORT_DAYS: Days = 30;
/// Warehouse buffer for an unconfigured (warehouse type, location) pair.
pub const DEFAULT_BUFFER_DAYS: Days = 39;
/// Fixed order-processing allowance.
pub const PROCESSING_DAYS: Days = 15;
/// Fixed safety buffer on top of every commitment.
pub const SAFETY_BUFFER_DAYS: Days = 30;

/// Customs allowance added when only the confirmed-ready date is known.
pub const CUSTOMS_ALLOWANCE_DAYS: Days = 12;
/// Flat fallback when an inbound line carries no usable date at all.
pub const INBOUND_FALLBACK_DAYS: Days = 55;
/// Grace period applied when a resolved inbound date is already past.
pub const PAST_ARRIVAL_GRACE_DAYS: Days = 7;

/// The configured lookup tables behind lead-time resolution.
///
/// Immutable for the engine's lifetime; misses never fail.
#[derive(Debug, Clone, Default)]
pub struct LeadTimeProfile {
    transport: HashMap<(String, String), Days>,
    buffer: HashMap<(String, String), Days>,
    market_buffer: HashMap<String, Days>,
}

impl LeadTimeProfile {
    pub fn new(
        transport: HashMap<(String, String), Days>,
        buffer: HashMap<(String, String), Days>,
        market_buffer: HashMap<String, Days>,
    ) -> LeadTimeProfile {
        LeadTimeProfile {
            transport,
            buffer,
            market_buffer,
        }
    }

    /// Transport days for a (ship region, arrival region) pair.
    pub fn transport_days(&self, ship_region: &str, arrival_region: &str) -> Option<Days> {
        self.transport
            .get(&(ship_region.to_string(), arrival_region.to_string()))
            .copied()
    }

    /// Buffer days for a (warehouse type, location) pair.
    pub fn buffer_days(&self, wh_type: &str, location: &str) -> Option<Days> {
        self.buffer
            .get(&(wh_type.to_string(), location.to_string()))
            .copied()
    }

    /// Market-level receiving buffer. Zero when goods already sit in the
    /// arrival region.
    pub fn market_buffer_days(&self, market: &str, ship_region: Option<&str>) -> Days {
        if ship_region == Some(market) {
            return 0;
        }
        self.market_buffer
            .get(market)
            .copied()
            .unwrap_or(DEFAULT_BUFFER_DAYS)
    }
}

/// Which additive components fell back to their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadTimeComponent {
    Production,
    Transport,
    Buffer,
}

/// A fully resolved lead time, component by component.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedLeadTime {
    pub production: Days,
    pub transport: Days,
    pub buffer: Days,
    pub processing: Days,
    pub safety: Days,
    /// Components resolved through a default rather than a lookup hit.
    pub defaulted: Vec<LeadTimeComponent>,
}

impl ResolvedLeadTime {
    pub fn total(&self) -> Days {
        self.production + self.transport + self.buffer + self.processing + self.safety
    }
}

/// Resolve the total lead time for one supply commitment.
///
/// Monotonic in each additive term; never fails. With every lookup missing
/// the total is 45 + 30 + 39 + 15 + 30 = 159 days.
pub fn resolve(
    profile: &LeadTimeProfile,
    production_days: Option<Days>,
    ship_region: Option<&str>,
    arrival_region: &str,
    wh_type: Option<&str>,
) -> ResolvedLeadTime {
    let mut defaulted = Vec::new();

    let production = match production_days {
        Some(days) => days,
        None => {
            defaulted.push(LeadTimeComponent::Production);
            DEFAULT_PRODUCTION_DAYS
        }
    };

    let transport = match ship_region.and_then(|s| profile.transport_days(s, arrival_region)) {
        Some(days) => days,
        None => {
            defaulted.push(LeadTimeComponent::Transport);
            DEFAULT_TRANSPORT_DAYS
        }
    };

    let buffer = match wh_type.and_then(|w| profile.buffer_days(w, arrival_region)) {
        Some(days) => days,
        None => {
            defaulted.push(LeadTimeComponent::Buffer);
            DEFAULT_BUFFER_DAYS
        }
    };

    ResolvedLeadTime {
        production,
        transport,
        buffer,
        processing: PROCESSING_DAYS,
        safety: SAFETY_BUFFER_DAYS,
        defaulted,
    }
}

/// Arrival week for a commitment anchored at `reference_date`.
///
/// Reference dates already in the past are clamped to the run date first.
pub fn arrival_week(reference_date: NaiveDate, total_days: Days, run_date: NaiveDate) -> CalWeek {
    let anchor = reference_date.max(run_date);
    CalWeek::from_date(anchor + Duration::days(total_days))
}

/// The dates an inbound shipment line may carry, in fallback priority order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InboundDates {
    pub carrier_expected: Option<NaiveDate>,
    pub actual_arrival: Option<NaiveDate>,
    pub movement: Option<NaiveDate>,
    pub confirmed_ready: Option<NaiveDate>,
}

/// Which stage of the fallback chain produced the arrival date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundDateSource {
    CarrierExpected,
    ActualArrival,
    Movement,
    ConfirmedReady,
    Fallback,
}

/// Resolve the arrival date for an inbound shipment line.
///
/// Chain: carrier expected date; else actual arrival + market buffer; else
/// movement date + buffer + transport; else confirmed-ready date + buffer +
/// transport + customs allowance; else run date + 55 days. A resolved date
/// already in the past becomes run date + 7 days.
pub fn resolve_inbound_arrival(
    dates: InboundDates,
    buffer_days: Days,
    transport_days: Days,
    run_date: NaiveDate,
) -> (NaiveDate, InboundDateSource) {
    let (resolved, source) = if let Some(expected) = dates.carrier_expected {
        (expected, InboundDateSource::CarrierExpected)
    } else if let Some(arrived) = dates.actual_arrival {
        (
            arrived + Duration::days(buffer_days),
            InboundDateSource::ActualArrival,
        )
    } else if let Some(moved) = dates.movement {
        (
            moved + Duration::days(buffer_days + transport_days),
            InboundDateSource::Movement,
        )
    } else if let Some(ready) = dates.confirmed_ready {
        (
            ready + Duration::days(buffer_days + transport_days + CUSTOMS_ALLOWANCE_DAYS),
            InboundDateSource::ConfirmedReady,
        )
    } else {
        (
            run_date + Duration::days(INBOUND_FALLBACK_DAYS),
            InboundDateSource::Fallback,
        )
    };

    if resolved < run_date {
        (run_date + Duration::days(PAST_ARRIVAL_GRACE_DAYS), source)
    } else {
        (resolved, source)
    }
}
