use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use serde_json::{json, Value};

use stockflow_core::config::EngineConfig;
use stockflow_core::supply::leadtime;

use crate::input;

/// Arguments for lead-time resolution
#[derive(Args)]
pub struct LeadTimeArgs {
    /// Region the commitment ships from
    #[arg(long)]
    pub ship_region: Option<String>,

    /// Region the commitment arrives in
    #[arg(long)]
    pub arrival_region: String,

    /// Warehouse type for the buffer lookup, e.g. 3PL or DI
    #[arg(long)]
    pub wh_type: Option<String>,

    /// Production lead time from master data
    #[arg(long)]
    pub production_days: Option<i64>,

    /// Date the lead time anchors on (defaults to the run date)
    #[arg(long)]
    pub reference_date: Option<NaiveDate>,

    /// YAML configuration file with the lookup tables
    #[arg(long)]
    pub config: Option<String>,

    /// Run date override
    #[arg(long)]
    pub run_date: Option<NaiveDate>,
}

pub fn run_leadtime(args: LeadTimeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config: EngineConfig = if let Some(ref path) = args.config {
        input::file::read_yaml(path)?
    } else {
        let run_date = args
            .run_date
            .unwrap_or_else(|| Local::now().date_naive());
        EngineConfig::with_defaults(run_date, run_date.year())
    };

    let profile = config.lead_time_profile();
    let resolved = leadtime::resolve(
        &profile,
        args.production_days,
        args.ship_region.as_deref(),
        &args.arrival_region,
        args.wh_type.as_deref(),
    );
    let anchor = args.reference_date.unwrap_or(config.run_date);
    let arrival = leadtime::arrival_week(anchor, resolved.total(), config.run_date);

    Ok(json!({
        "result": {
            "production_days": resolved.production,
            "transport_days": resolved.transport,
            "buffer_days": resolved.buffer,
            "processing_days": resolved.processing,
            "safety_buffer_days": resolved.safety,
            "total_days": resolved.total(),
            "defaulted_components": resolved.defaulted,
            "arrival_week": arrival.label(),
        }
    }))
}
