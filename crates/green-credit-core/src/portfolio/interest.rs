use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::credit::record::CreditRecord;
use crate::types::*;

/// Interest realised on one credit, for the dashboard bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditInterest {
    pub credit_id: i64,
    pub description: String,
    /// Rounded to whole units.
    pub interest_earned: Money,
}

/// Interest realised so far on one credit.
///
/// Assumes interest accrues linearly with repayment: the flat interest
/// portion scaled by the fraction of the total owed already paid. `None`
/// when the total owed is zero.
pub fn interest_earned(record: &CreditRecord) -> Option<Money> {
    let total_owed = record.total_owed();
    if total_owed.is_zero() {
        return None;
    }
    let fraction_paid = record.amount_paid / total_owed;
    Some(record.interest_portion() * fraction_paid)
}

/// Sum of realised interest across active credits.
pub fn total_interest_earned(records: &[CreditRecord]) -> Money {
    records
        .iter()
        .filter(|r| r.is_active())
        .filter_map(|r| {
            let earned = interest_earned(r);
            if earned.is_none() {
                log::debug!("credit {} has zero total owed; skipped from interest", r.id);
            }
            earned
        })
        .fold(Decimal::ZERO, |acc, x| acc + x)
}

/// Rounded realised interest for the first `limit` active credits.
pub fn interest_earned_per_credit(records: &[CreditRecord], limit: usize) -> Vec<CreditInterest> {
    records
        .iter()
        .filter(|r| r.is_active())
        .map(|r| CreditInterest {
            credit_id: r.id,
            description: r.description_or_empty().to_string(),
            interest_earned: interest_earned(r)
                .map(round_half_up)
                .unwrap_or(Decimal::ZERO),
        })
        .take(limit)
        .collect()
}
