use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use colored::Colorize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use stockflow_core::config::EngineConfig;
use stockflow_core::engine::{self, ProjectionOutput};
use stockflow_core::output as wide;
use stockflow_core::quality::DataQualityReport;
use stockflow_core::tables::SourceTables;

use crate::input;

/// Arguments for a full projection run
#[derive(Args)]
pub struct ProjectArgs {
    /// Directory holding the exported CSV source tables
    #[arg(long)]
    pub data_dir: PathBuf,

    /// YAML configuration file (run date, cutoff year, lookup tables)
    #[arg(long)]
    pub config: Option<String>,

    /// Where to write the wide result CSV
    #[arg(long, default_value = "projection.csv")]
    pub out: PathBuf,

    /// Revenue cutoff year, when no configuration file is given
    #[arg(long)]
    pub cutoff_year: Option<i32>,

    /// Run date override, when no configuration file is given
    #[arg(long)]
    pub run_date: Option<NaiveDate>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = load_config(&args)?;
    let tables = load_tables(&args.data_dir)?;

    let output = engine::run(&tables, &config)?;
    write_wide_csv(&args.out, &output)?;
    print_warnings(&output.report);

    Ok(json!({
        "result": {
            "output_file": args.out.display().to_string(),
            "references": output.summary.references,
            "stockout_references": output.summary.stockout_references,
            "demand_coverage_pct": output.summary.demand_coverage_pct,
            "data_quality_issues": output.report.total_issues(),
        },
        "summary": output.summary,
        "report": output.report,
    }))
}

fn load_config(args: &ProjectArgs) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let config = if let Some(ref path) = args.config {
        input::file::read_yaml(path)?
    } else {
        let run_date = args
            .run_date
            .unwrap_or_else(|| Local::now().date_naive());
        let cutoff_year = args.cutoff_year.unwrap_or_else(|| run_date.year());
        EngineConfig::with_defaults(run_date, cutoff_year)
    };
    Ok(config)
}

fn load_tables(data_dir: &Path) -> Result<SourceTables, Box<dyn std::error::Error>> {
    Ok(SourceTables {
        demand: input::file::read_csv_or_empty(&data_dir.join("demand.csv"))?,
        inventory: input::file::read_csv_or_empty(&data_dir.join("inventory.csv"))?,
        open_orders: input::file::read_csv_or_empty(&data_dir.join("open_orders.csv"))?,
        inbound: input::file::read_csv_or_empty(&data_dir.join("inbound.csv"))?,
        master: input::file::read_csv_or_empty(&data_dir.join("master.csv"))?,
        vendors: input::file::read_csv_or_empty(&data_dir.join("vendors.csv"))?,
        prices: input::file::read_csv_or_empty(&data_dir.join("prices.csv"))?,
        product_vendors: input::file::read_csv_or_empty(&data_dir.join("product_vendors.csv"))?,
        delivery_performance: input::file::read_csv_or_empty(
            &data_dir.join("delivery_performance.csv"),
        )?,
        active_products: input::file::read_csv_or_empty(&data_dir.join("active_products.csv"))?,
    })
}

fn write_wide_csv(
    path: &Path,
    output: &ProjectionOutput,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
    writer.write_record(wide::header(&output.weeks))?;
    for row in &output.rows {
        writer.write_record(wide::record(row))?;
    }
    writer.flush()?;
    Ok(())
}

fn print_warnings(report: &DataQualityReport) {
    if report.is_clean() {
        return;
    }
    let counts = [
        ("unknown market codes", report.unknown_markets.len()),
        ("unknown stage codes", report.unknown_stages.len()),
        ("unmatched references", report.unmatched_references.len()),
        ("clamped quantities", report.clamped_quantities.len()),
        ("lead-time defaults", report.lead_time_defaults.len()),
        ("unpriced references", report.unpriced_references.len()),
    ];
    for (label, count) in counts {
        if count > 0 {
            eprintln!("{}: {} {}", "warning".yellow().bold(), count, label);
        }
    }
}
