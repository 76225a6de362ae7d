use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::credit::record::CreditRecord;
use crate::types::*;

/// Fixed projection horizon for green-credit savings, independent of the
/// credit's term.
pub const SAVINGS_HORIZON_YEARS: u32 = 10;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Projected savings from the upgrade a green credit financed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEntry {
    pub credit_id: i64,
    pub description: String,
    pub monthly_savings: Money,
    pub yearly_savings: Money,
    pub ten_year_savings: Money,
}

/// Savings for every active credit with a positive pre-credit expense.
///
/// `monthly = initial − final` (a missing final expense counts as zero),
/// `yearly = monthly × 12`, `ten_year = yearly × 10`.
pub fn compute_savings_per_credit(records: &[CreditRecord]) -> Vec<SavingsEntry> {
    records
        .iter()
        .filter(|r| r.is_active())
        .filter_map(|r| {
            let initial = r.initial_monthly_expense.filter(|e| *e > Decimal::ZERO)?;
            let monthly = initial - r.final_monthly_expense.unwrap_or(Decimal::ZERO);
            let yearly = monthly * MONTHS_PER_YEAR;
            Some(SavingsEntry {
                credit_id: r.id,
                description: r.description_or_empty().to_string(),
                monthly_savings: monthly,
                yearly_savings: yearly,
                ten_year_savings: yearly * Decimal::from(SAVINGS_HORIZON_YEARS),
            })
        })
        .collect()
}

/// Total projected savings over the horizon across all entries.
pub fn total_expected_savings(entries: &[SavingsEntry]) -> Money {
    entries
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc + e.ten_year_savings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credit::record::CreditState;

    fn record(id: i64, state: CreditState, initial: Option<Decimal>, fin: Option<Decimal>) -> CreditRecord {
        CreditRecord {
            id,
            client_id: 1,
            principal: dec!(60000),
            annual_interest_rate: dec!(6),
            term_months: 24,
            amount_paid: Decimal::ZERO,
            accumulated_debt: Decimal::ZERO,
            state,
            start_date: None,
            initial_monthly_expense: initial,
            final_monthly_expense: fin,
            description: Some("Paneles".into()),
            category: None,
            item_id: None,
            is_offer: false,
        }
    }

    #[test]
    fn test_savings_projection() {
        let records = vec![record(1, CreditState::Accepted, Some(dec!(1000)), Some(dec!(400)))];
        let entries = compute_savings_per_credit(&records);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].monthly_savings, dec!(600));
        assert_eq!(entries[0].yearly_savings, dec!(7200));
        assert_eq!(entries[0].ten_year_savings, dec!(72000));
    }

    #[test]
    fn test_non_positive_initial_excluded() {
        let records = vec![
            record(1, CreditState::Accepted, Some(Decimal::ZERO), Some(dec!(100))),
            record(2, CreditState::Accepted, Some(dec!(-5)), None),
            record(3, CreditState::Accepted, None, None),
            record(4, CreditState::Pending, Some(dec!(1000)), Some(dec!(400))),
        ];
        assert!(compute_savings_per_credit(&records).is_empty());
    }

    #[test]
    fn test_missing_final_counts_as_zero() {
        let records = vec![record(1, CreditState::Accepted, Some(dec!(300)), None)];
        let entries = compute_savings_per_credit(&records);
        assert_eq!(entries[0].monthly_savings, dec!(300));
    }

    #[test]
    fn test_total_expected_savings() {
        let records = vec![
            record(1, CreditState::Accepted, Some(dec!(1000)), Some(dec!(400))),
            record(2, CreditState::Accepted, Some(dec!(500)), Some(dec!(450))),
        ];
        let entries = compute_savings_per_credit(&records);
        assert_eq!(total_expected_savings(&entries), dec!(78000));
    }
}
