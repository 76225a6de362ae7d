mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::credit::{PayArgs, TransitionArgs};
use commands::offers::OfferArgs;
use commands::portfolio::SnapshotArgs;

/// Green credit portfolio analytics
#[derive(Parser)]
#[command(
    name = "gca",
    version,
    about = "Green credit portfolio analytics",
    long_about = "A CLI for the green credit back office: delinquency alerts, \
                  interest earned, projected savings and on-time rates over a \
                  credit snapshot, plus offer checks and lifecycle updates, \
                  all with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full admin dashboard summary for a credit snapshot
    Portfolio(SnapshotArgs),
    /// Active credits behind their expected payment
    Alerts(SnapshotArgs),
    /// Interest realised on active credits
    Interest(SnapshotArgs),
    /// Projected savings from green credits
    Savings(SnapshotArgs),
    /// Percentage of active credits paid up to date
    OnTime(SnapshotArgs),
    /// Distinct clients with an active credit
    ActiveClients(SnapshotArgs),
    /// Lending by category, rate distribution and monthly decisions
    Breakdown(SnapshotArgs),
    /// Monthly payment and savings share for credit offers
    OfferTerms(OfferArgs),
    /// Check generated offers against the client's budget
    ValidateOffers(OfferArgs),
    /// Approve, deny, accept or decline a credit
    Transition(TransitionArgs),
    /// Apply a payment to a credit
    Pay(PayArgs),
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

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Portfolio(args) => commands::portfolio::run_portfolio(args),
        Commands::Alerts(args) => commands::portfolio::run_alerts(args),
        Commands::Interest(args) => commands::portfolio::run_interest(args),
        Commands::Savings(args) => commands::portfolio::run_savings(args),
        Commands::OnTime(args) => commands::portfolio::run_on_time(args),
        Commands::ActiveClients(args) => commands::portfolio::run_active_clients(args),
        Commands::Breakdown(args) => commands::portfolio::run_breakdown(args),
        Commands::OfferTerms(args) => commands::offers::run_offer_terms(args),
        Commands::ValidateOffers(args) => commands::offers::run_validate_offers(args),
        Commands::Transition(args) => commands::credit::run_transition(args),
        Commands::Pay(args) => commands::credit::run_pay(args),
        Commands::Version => {
            println!("gca {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
