use chrono::{Datelike, Local};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use stockflow_core::config::EngineConfig;
use stockflow_core::recommend;

use crate::input;

/// Arguments for warehouse-channel routing
#[derive(Args)]
pub struct RouteArgs {
    /// Carton count of the order
    #[arg(long, conflicts_with = "quantity")]
    pub cartons: Option<u32>,

    /// Order quantity in units, converted via --units-per-carton
    #[arg(long, requires = "units_per_carton")]
    pub quantity: Option<Decimal>,

    /// Units per master carton
    #[arg(long)]
    pub units_per_carton: Option<u32>,

    /// Country the order originates in
    #[arg(long)]
    pub origin_country: String,

    /// YAML configuration file with the routing rules
    #[arg(long)]
    pub config: Option<String>,
}

pub fn run_route(args: RouteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config: EngineConfig = if let Some(ref path) = args.config {
        input::file::read_yaml(path)?
    } else {
        let today = Local::now().date_naive();
        EngineConfig::with_defaults(today, today.year())
    };

    let cartons = match (args.cartons, args.quantity, args.units_per_carton) {
        (Some(cartons), _, _) => cartons,
        (None, Some(quantity), Some(per_carton)) => {
            recommend::carton_count(quantity, per_carton)
        }
        _ => return Err("--cartons or --quantity with --units-per-carton required".into()),
    };

    let special_routing = config.is_special_routing(&args.origin_country);
    let channel = recommend::route_order(cartons, special_routing, config.max_cartons_third_party);

    Ok(json!({
        "result": {
            "cartons": cartons,
            "origin_country": args.origin_country,
            "special_routing": special_routing,
            "channel": channel.wh_type(),
        }
    }))
}
