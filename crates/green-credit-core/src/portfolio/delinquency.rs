use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::credit::record::CreditRecord;
use crate::time_value::{months_elapsed, DAYS_PER_MONTH};
use crate::types::*;

/// A delinquent active credit, as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelinquencyAlert {
    pub client_id: i64,
    pub credit_id: i64,
    pub client_label: String,
    pub description: String,
    /// Rounded to whole units.
    pub expected_payment: Money,
    pub amount_paid: Money,
    /// `round(expected − paid)`.
    pub shortfall: Money,
}

/// Payment that should have accrued by `as_of` under a flat schedule.
///
/// `principal × (1 + rate/100) / term × months_elapsed`, where elapsed
/// months are counted in fixed 30-day blocks. `None` when the credit has
/// no start date or a zero term: there is no schedule to compare against.
pub fn expected_payment(record: &CreditRecord, as_of: NaiveDate) -> Option<Money> {
    let start = record.start_date?;
    if record.term_months == 0 {
        return None;
    }
    let months = months_elapsed(start, as_of, DAYS_PER_MONTH);
    // Multiply before dividing so whole-month schedules stay exact.
    Some(record.total_owed() * Decimal::from(months) / Decimal::from(record.term_months))
}

/// True when the payment accrued by `as_of` exceeds what has been paid.
///
/// Does not look at the credit state; callers filter to active credits.
/// A credit with no computable expectation is never delinquent.
pub fn is_delinquent(record: &CreditRecord, as_of: NaiveDate) -> bool {
    match expected_payment(record, as_of) {
        Some(expected) => expected > record.amount_paid,
        None => false,
    }
}

/// Alerts for every active credit that is behind schedule, in input order.
pub fn collect_delinquency_alerts(
    records: &[CreditRecord],
    as_of: NaiveDate,
) -> Vec<DelinquencyAlert> {
    records
        .iter()
        .filter(|r| r.is_active())
        .filter_map(|r| {
            let expected = expected_payment(r, as_of)?;
            if expected <= r.amount_paid {
                return None;
            }
            log::debug!(
                "credit {} (client {}) behind schedule: expected {}, paid {}",
                r.id,
                r.client_id,
                expected,
                r.amount_paid
            );
            Some(DelinquencyAlert {
                client_id: r.client_id,
                credit_id: r.id,
                client_label: format!("Cliente {}", r.client_id),
                description: r.description_or_empty().to_string(),
                expected_payment: round_half_up(expected),
                amount_paid: r.amount_paid,
                shortfall: round_half_up(expected - r.amount_paid),
            })
        })
        .collect()
}
