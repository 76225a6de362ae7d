use chrono::NaiveDate;
use clap::Args;
use serde::Deserialize;
use serde_json::{json, Value};

use green_credit_core::analytics::breakdown;
use green_credit_core::credit::record::CreditRecord;
use green_credit_core::portfolio::{
    delinquency, interest, savings, stats, summary, PortfolioAssumptions,
};

use crate::input;

/// Arguments shared by every command that reads a credit snapshot
#[derive(Args)]
pub struct SnapshotArgs {
    /// Path to JSON file with the credits (array, or object with "records")
    #[arg(long)]
    pub input: Option<String>,

    /// YAML file with portfolio assumptions
    #[arg(long)]
    pub config: Option<String>,

    /// Valuation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Records(Vec<CreditRecord>),
    Wrapped { records: Vec<CreditRecord> },
}

impl SnapshotArgs {
    fn load(&self) -> Result<(Vec<CreditRecord>, PortfolioAssumptions), Box<dyn std::error::Error>> {
        let snapshot: Snapshot = input::load(self.input.as_deref(), "an array of credits")?;
        let records = match snapshot {
            Snapshot::Records(r) | Snapshot::Wrapped { records: r } => r,
        };
        let assumptions = input::config::load_assumptions(self.config.as_deref(), self.as_of)?;
        log::info!("loaded {} credits as of {}", records.len(), assumptions.as_of);
        Ok((records, assumptions))
    }
}

pub fn run_portfolio(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (records, assumptions) = args.load()?;
    let result = summary::analyze_portfolio(&records, &assumptions)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_alerts(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (records, assumptions) = args.load()?;
    let alerts = delinquency::collect_delinquency_alerts(&records, assumptions.as_of);
    Ok(serde_json::to_value(alerts)?)
}

pub fn run_interest(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (records, assumptions) = args.load()?;
    Ok(json!({
        "total_interest_earned": interest::total_interest_earned(&records),
        "interest_by_credit": interest::interest_earned_per_credit(
            &records,
            assumptions.interest_chart_limit,
        ),
    }))
}

pub fn run_savings(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (records, _) = args.load()?;
    let entries = savings::compute_savings_per_credit(&records);
    Ok(json!({
        "total_expected_savings": savings::total_expected_savings(&entries),
        "savings": entries,
    }))
}

pub fn run_on_time(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (records, assumptions) = args.load()?;
    Ok(json!({
        "as_of": assumptions.as_of,
        "percent_on_time": stats::percent_on_time(&records, assumptions.as_of),
    }))
}

pub fn run_active_clients(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (records, _) = args.load()?;
    Ok(json!({
        "distinct_active_clients": stats::distinct_clients_with_active_credit(&records),
        "state_counts": stats::count_by_state(&records),
    }))
}

pub fn run_breakdown(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (records, assumptions) = args.load()?;
    let result = breakdown::portfolio_breakdown(&records, &assumptions)?;
    Ok(serde_json::to_value(result)?)
}
