use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::credit::record::{CreditRecord, CreditState};
use crate::portfolio::delinquency::is_delinquent;
use crate::types::*;

/// Number of credits in each lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub pending: usize,
    pub approved: usize,
    pub accepted: usize,
    pub denied: usize,
}

/// Share of active credits that are not behind schedule, rounded to a
/// whole percent. An empty active set counts as fully on time.
pub fn percent_on_time(records: &[CreditRecord], as_of: NaiveDate) -> Decimal {
    let (active, on_time) = records
        .iter()
        .filter(|r| r.is_active())
        .fold((0usize, 0usize), |(active, on_time), r| {
            let current = usize::from(!is_delinquent(r, as_of));
            (active + 1, on_time + current)
        });

    if active == 0 {
        return dec!(100);
    }
    round_half_up(Decimal::from(on_time) * dec!(100) / Decimal::from(active))
}

/// Count of distinct clients holding at least one active credit.
pub fn distinct_clients_with_active_credit(records: &[CreditRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.is_active())
        .map(|r| r.client_id)
        .collect::<HashSet<_>>()
        .len()
}

pub fn count_by_state(records: &[CreditRecord]) -> StateCounts {
    records
        .iter()
        .fold(StateCounts::default(), |mut counts, r| {
            match r.state {
                CreditState::Pending => counts.pending += 1,
                CreditState::Approved => counts.approved += 1,
                CreditState::Accepted => counts.accepted += 1,
                CreditState::Denied => counts.denied += 1,
            }
            counts
        })
}
