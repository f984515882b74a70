//! The resolved, immutable configuration object the engine consumes.
//!
//! Constructed once before processing begins and passed by reference; the
//! engine never reads a clock, an environment variable, or a file. The
//! seeded tables below mirror the operational defaults shipped with the
//! tool; a deployment normally overrides them from its own configuration
//! document.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::StockflowError;
use crate::supply::leadtime::LeadTimeProfile;
use crate::types::Days;
use crate::StockflowResult;

/// One (ship region, arrival region) transport lead-time entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportEntry {
    pub ship_region: String,
    pub arrival_region: String,
    pub days: Days,
}

/// One (warehouse type, location) buffer entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferEntry {
    pub wh_type: String,
    pub location: String,
    pub days: Days,
}

/// Engine configuration. Immutable for the engine's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Snapshot date of the run; week 0 of the horizon contains it.
    pub run_date: NaiveDate,
    /// Calendar year bounding the revenue-miss metrics.
    pub cutoff_year: i32,
    #[serde(default = "default_transport_entries")]
    pub transport_lead_times: Vec<TransportEntry>,
    #[serde(default = "default_buffer_entries")]
    pub warehouse_buffers: Vec<BufferEntry>,
    /// Market-level receiving buffer used by the inbound fallback chain.
    #[serde(default = "default_market_buffers")]
    pub market_buffers: BTreeMap<String, Days>,
    /// Vendor country to ship-region code.
    #[serde(default = "default_country_regions")]
    pub country_regions: BTreeMap<String, String>,
    /// Origin countries that always route to the third-party channel.
    #[serde(default = "default_special_routing_countries")]
    pub special_routing_countries: BTreeSet<String>,
    /// Carton count at or below which an order takes the third-party channel.
    #[serde(default = "default_max_cartons_third_party")]
    pub max_cartons_third_party: u32,
}

impl EngineConfig {
    /// A configuration carrying the seeded default tables.
    pub fn with_defaults(run_date: NaiveDate, cutoff_year: i32) -> EngineConfig {
        EngineConfig {
            run_date,
            cutoff_year,
            transport_lead_times: default_transport_entries(),
            warehouse_buffers: default_buffer_entries(),
            market_buffers: default_market_buffers(),
            country_regions: default_country_regions(),
            special_routing_countries: default_special_routing_countries(),
            max_cartons_third_party: default_max_cartons_third_party(),
        }
    }

    pub fn validate(&self) -> StockflowResult<()> {
        if self.cutoff_year < self.run_date.year() {
            return Err(StockflowError::InvalidInput {
                field: "cutoff_year".into(),
                reason: format!(
                    "cutoff year {} lies before the run date {}",
                    self.cutoff_year, self.run_date
                ),
            });
        }
        for entry in &self.transport_lead_times {
            if entry.days < 0 {
                return Err(StockflowError::InvalidInput {
                    field: "transport_lead_times".into(),
                    reason: format!(
                        "negative lead time for ({}, {})",
                        entry.ship_region, entry.arrival_region
                    ),
                });
            }
        }
        for entry in &self.warehouse_buffers {
            if entry.days < 0 {
                return Err(StockflowError::InvalidInput {
                    field: "warehouse_buffers".into(),
                    reason: format!(
                        "negative buffer for ({}, {})",
                        entry.wh_type, entry.location
                    ),
                });
            }
        }
        Ok(())
    }

    /// Build the lookup tables behind lead-time resolution.
    pub fn lead_time_profile(&self) -> LeadTimeProfile {
        let transport: HashMap<(String, String), Days> = self
            .transport_lead_times
            .iter()
            .map(|e| ((e.ship_region.clone(), e.arrival_region.clone()), e.days))
            .collect();
        let buffer: HashMap<(String, String), Days> = self
            .warehouse_buffers
            .iter()
            .map(|e| ((e.wh_type.clone(), e.location.clone()), e.days))
            .collect();
        let market_buffer: HashMap<String, Days> = self
            .market_buffers
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        LeadTimeProfile::new(transport, buffer, market_buffer)
    }

    pub fn region_for_country(&self, country: &str) -> Option<&str> {
        self.country_regions.get(country).map(String::as_str)
    }

    pub fn is_special_routing(&self, country: &str) -> bool {
        self.special_routing_countries.contains(country)
    }
}

fn default_max_cartons_third_party() -> u32 {
    5
}

fn default_transport_entries() -> Vec<TransportEntry> {
    let seed: &[(&str, &str, Days)] = &[
        ("CN", "US", 39),
        ("CN", "EU", 42),
        ("CN", "UK", 34),
        ("CN", "Asia", 23),
        ("CN", "MX", 39),
        ("CN", "CO", 39),
        ("CN", "BR", 39),
        ("CN", "CA", 39),
        ("CN", "CN", 39),
        ("CN", "JP", 20),
        ("IN", "US", 45),
        ("IN", "EU", 33),
        ("IN", "UK", 26),
        ("IN", "CA", 45),
        ("IN", "CO", 15),
        ("IN", "BR", 15),
        ("IN", "MX", 40),
        ("IN", "JP", 15),
        ("IN", "Asia", 23),
        ("EU", "US", 40),
        ("EU", "MX", 40),
        ("EU", "CO", 40),
        ("EU", "BR", 40),
        ("EU", "CA", 40),
        ("EU", "UK", 40),
        ("EU", "EU", 7),
        ("EU", "JP", 10),
        ("EU", "AU", 7),
        ("UK", "US", 36),
        ("UK", "CA", 15),
        ("UK", "JP", 15),
        ("UK", "UK", 2),
        ("UK", "EU", 7),
        ("UK", "AU", 2),
        ("US", "UK", 52),
        ("US", "EU", 20),
        ("US", "MX", 15),
        ("US", "CO", 15),
        ("US", "BR", 15),
        ("US", "CA", 15),
        ("US", "CN", 39),
        ("US", "US", 7),
        ("CA", "CA", 2),
        ("CA", "US", 2),
        ("CA", "UK", 15),
        ("CA", "EU", 40),
        ("CA", "BR", 40),
        ("CA", "MX", 40),
        ("CA", "CO", 20),
        ("MX", "CN", 20),
        ("MX", "UK", 15),
        ("MX", "MX", 15),
        ("MX", "BR", 15),
        ("MX", "US", 40),
        ("MX", "CA", 40),
        ("MX", "CO", 15),
        ("MX", "AU", 7),
        ("CO", "MX", 15),
        ("CO", "EU", 39),
        ("CO", "CO", 7),
        ("CO", "US", 15),
        ("CO", "CA", 39),
        ("CO", "JP", 2),
        ("BR", "MX", 15),
        ("BR", "CO", 15),
        ("BR", "EU", 15),
        ("BR", "IN", 15),
        ("BR", "BR", 15),
        ("BR", "US", 15),
        ("BR", "CA", 15),
        ("BR", "JP", 15),
        ("AU", "Other", 15),
        ("AU", "CN", 15),
        ("Other", "AU", 15),
        ("JP", "US", 39),
    ];
    seed.iter()
        .map(|(ship, arrival, days)| TransportEntry {
            ship_region: ship.to_string(),
            arrival_region: arrival.to_string(),
            days: *days,
        })
        .collect()
}

fn default_buffer_entries() -> Vec<BufferEntry> {
    let seed: &[(&str, &str, Days)] = &[
        ("3PL", "US", 39),
        ("3PL", "CO", 39),
        ("3PL", "MX", 39),
        ("3PL", "BR", 39),
        ("3PL", "EU", 40),
        ("3PL", "CA", 39),
        ("3PL", "UK", 39),
        ("3PL", "Other", 39),
        ("DI", "US", 25),
        ("DI", "EU", 26),
        ("DI", "UK", 22),
        ("DI", "CA", 25),
    ];
    seed.iter()
        .map(|(wh, location, days)| BufferEntry {
            wh_type: wh.to_string(),
            location: location.to_string(),
            days: *days,
        })
        .collect()
}

fn default_market_buffers() -> BTreeMap<String, Days> {
    [
        ("US", 39),
        ("CO", 39),
        ("MX", 39),
        ("CA", 39),
        ("UK", 39),
        ("BR", 36),
        ("EU", 40),
        ("Other", 39),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn default_country_regions() -> BTreeMap<String, String> {
    [
        ("China", "CN"),
        ("Hong Kong", "CN"),
        ("Taiwan (Province of China)", "CN"),
        ("Viet Nam", "Asia"),
        ("Malaysia", "Asia"),
        ("Singapore", "Asia"),
        ("Korea (the Republic of)", "Asia"),
        ("Japan", "JP"),
        ("India", "IN"),
        ("Poland", "EU"),
        ("Germany", "EU"),
        ("United Kingdom", "UK"),
        ("United States", "US"),
        ("Canada", "CA"),
        ("Mexico", "MX"),
        ("Brazil", "BR"),
        ("Colombia", "CO"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_special_routing_countries() -> BTreeSet<String> {
    [
        "China",
        "Hong Kong",
        "Malaysia",
        "Taiwan (Province of China)",
        "Viet Nam",
        "Korea (the Republic of)",
        "Singapore",
        "Japan",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
