mod commands;
mod input;
mod logging;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::settlement::{BatchArgs, CalculateArgs, CaptionArgs, ScheduleArgs};

/// Partner settlement calculator
#[derive(Parser)]
#[command(
    name = "settle",
    version,
    about = "Partner settlement calculator",
    long_about = "Breaks a payment down into supply amount, VAT, card and service fees, \
                  withholding tax and the final amount settled to the partner. \
                  All arithmetic uses decimal precision with whole-won rounding."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Settle a single payment
    Calculate(CalculateArgs),
    /// Settle a list of payments and total them
    Batch(BatchArgs),
    /// Print the amount caption (grouped won and Korean reading)
    Caption(CaptionArgs),
    /// Print the effective fee schedule
    Schedule(ScheduleArgs),
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
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::settlement::run_calculate(args),
        Commands::Batch(args) => commands::settlement::run_batch(args),
        Commands::Caption(args) => commands::settlement::run_caption(args),
        Commands::Schedule(args) => commands::settlement::run_schedule(args),
        Commands::Version => {
            println!("settle {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
