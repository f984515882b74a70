mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::classify::ClassifyArgs;
use commands::leadtime::LeadTimeArgs;
use commands::project::ProjectArgs;
use commands::route::RouteArgs;

/// Inventory projection and stockout-risk calculations
#[derive(Parser)]
#[command(
    name = "stockflow",
    version,
    about = "Inventory projection and stockout-risk calculations",
    long_about = "Projects per-product, per-market inventory forward across a \
                  two-year weekly horizon, predicts stockouts, quantifies \
                  revenue at risk, and emits expedite/transfer \
                  recommendations from exported source tables."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full projection from exported CSV source tables
    Project(ProjectArgs),
    /// Classify a purchase-order status code
    Classify(ClassifyArgs),
    /// Resolve the total lead time for a supply commitment
    Leadtime(LeadTimeArgs),
    /// Route an order to a warehouse channel
    Route(RouteArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::project::run_project(args),
        Commands::Classify(args) => commands::classify::run_classify(args),
        Commands::Leadtime(args) => commands::leadtime::run_leadtime(args),
        Commands::Route(args) => commands::route::run_route(args),
        Commands::Version => {
            println!("stockflow {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
