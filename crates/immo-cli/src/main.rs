mod commands;
mod config;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::CompareArgs;
use commands::detailed::DetailedArgs;
use commands::location::LocationArgs;
use commands::series::{AmortizationArgs, CashFlowArgs};
use commands::simple::SimpleArgs;
use config::CliConfig;

/// Rental property investment calculator
#[derive(Parser)]
#[command(
    name = "immo",
    version,
    about = "Rental property investment calculator",
    long_about = "Evaluate buy-to-let properties with decimal precision: yields, cash flow, \
                  loan payments, depreciation tax savings, amortization schedules and \
                  side-by-side comparisons."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter (e.g. "debug" or "immo_core=trace"); defaults to RUST_LOG, then "warn"
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Quick yield, cash-flow and depreciation analysis of one property
    Simple(SimpleArgs),
    /// Detailed analysis with transaction costs, equity split and leverage effect
    Detailed(DetailedArgs),
    /// Year-by-year loan amortization schedule
    Amortization(AmortizationArgs),
    /// Project an annual cash flow forward at a constant growth rate
    CashFlow(CashFlowArgs),
    /// Compare several saved calculations side by side
    Compare(CompareArgs),
    /// Indicative price and rent levels per m² for a city
    Location(LocationArgs),
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

    if let Err(e) = logging::init(cli.log_level.as_deref()) {
        fail(e);
    }

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!(?config, "loaded configuration");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simple(args) => commands::simple::run_simple(args, &config),
        Commands::Detailed(args) => commands::detailed::run_detailed(args),
        Commands::Amortization(args) => commands::series::run_amortization(args, &config),
        Commands::CashFlow(args) => commands::series::run_cash_flow(args, &config),
        Commands::Compare(args) => commands::compare::run_compare(args, &config),
        Commands::Location(args) => commands::location::run_location(args, &config),
        Commands::Version => {
            println!("immo {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}

fn fail(e: Box<dyn std::error::Error>) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}
