use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use green_credit_core::credit::lifecycle::{self, CreditAction};
use green_credit_core::credit::payment::{self, PaymentRequest};
use green_credit_core::credit::record::CreditRecord;

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ActionArg {
    Approve,
    Deny,
    Accept,
    Decline,
}

impl From<ActionArg> for CreditAction {
    fn from(a: ActionArg) -> Self {
        match a {
            ActionArg::Approve => CreditAction::Approve,
            ActionArg::Deny => CreditAction::Deny,
            ActionArg::Accept => CreditAction::Accept,
            ActionArg::Decline => CreditAction::Decline,
        }
    }
}

/// Arguments for a lifecycle transition
#[derive(Args)]
pub struct TransitionArgs {
    /// Path to JSON file with the credit
    #[arg(long)]
    pub input: Option<String>,

    /// Action to apply
    #[arg(long, value_enum)]
    pub action: ActionArg,

    /// Date the action takes effect (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

/// Arguments for applying a payment
#[derive(Args)]
pub struct PayArgs {
    /// Path to JSON file with the credit
    #[arg(long)]
    pub input: Option<String>,

    /// Amount to pay
    #[arg(long)]
    pub amount: Decimal,

    /// Client's current account balance
    #[arg(long)]
    pub balance: Decimal,

    /// Paying client (defaults to the credit's owner)
    #[arg(long)]
    pub client_id: Option<i64>,
}

pub fn run_transition(args: TransitionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: CreditRecord = input::load(args.input.as_deref(), "a credit")?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let updated = lifecycle::apply_action(&record, args.action.into(), as_of)?;
    Ok(serde_json::to_value(updated)?)
}

pub fn run_pay(args: PayArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: CreditRecord = input::load(args.input.as_deref(), "a credit")?;
    let request = PaymentRequest {
        credit_id: record.id,
        client_id: args.client_id.unwrap_or(record.client_id),
        amount: args.amount,
    };
    let outcome = payment::apply_payment(&record, &request, args.balance)?;
    Ok(serde_json::to_value(outcome)?)
}
