use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::credit::record::CreditRecord;
use crate::portfolio::assumptions::PortfolioAssumptions;
use crate::portfolio::delinquency::{collect_delinquency_alerts, DelinquencyAlert};
use crate::portfolio::interest::{interest_earned_per_credit, total_interest_earned, CreditInterest};
use crate::portfolio::savings::{compute_savings_per_credit, total_expected_savings, SavingsEntry};
use crate::portfolio::stats::{
    count_by_state, distinct_clients_with_active_credit, percent_on_time, StateCounts,
};
use crate::{types::*, GreenCreditResult};

/// Everything the admin dashboard derives from one record snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_credits: usize,
    pub state_counts: StateCounts,
    pub distinct_active_clients: usize,
    pub percent_on_time: Decimal,
    pub total_interest_earned: Money,
    pub total_expected_savings: Money,
    pub alerts: Vec<DelinquencyAlert>,
    pub savings: Vec<SavingsEntry>,
    pub interest_by_credit: Vec<CreditInterest>,
}

/// Run every portfolio aggregator over one snapshot.
///
/// Degenerate active records (no start date, zero term, zero total owed)
/// are reported as warnings rather than failing the computation.
pub fn analyze_portfolio(
    records: &[CreditRecord],
    assumptions: &PortfolioAssumptions,
) -> GreenCreditResult<ComputationOutput<PortfolioSummary>> {
    let start = Instant::now();
    assumptions.validate()?;

    let warnings = degenerate_record_warnings(records);
    for w in &warnings {
        log::warn!("{w}");
    }

    let savings = compute_savings_per_credit(records);
    let summary = PortfolioSummary {
        total_credits: records.len(),
        state_counts: count_by_state(records),
        distinct_active_clients: distinct_clients_with_active_credit(records),
        percent_on_time: percent_on_time(records, assumptions.as_of),
        total_interest_earned: total_interest_earned(records),
        total_expected_savings: total_expected_savings(&savings),
        alerts: collect_delinquency_alerts(records, assumptions.as_of),
        interest_by_credit: interest_earned_per_credit(records, assumptions.interest_chart_limit),
        savings,
    };

    log::debug!(
        "analyzed {} credits: {} alerts, {}% on time",
        summary.total_credits,
        summary.alerts.len(),
        summary.percent_on_time
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flat-interest portfolio aggregation (30-day months, 10-year savings horizon)",
        assumptions,
        warnings,
        elapsed,
        summary,
    ))
}

fn degenerate_record_warnings(records: &[CreditRecord]) -> Vec<String> {
    let mut warnings = Vec::new();
    for r in records.iter().filter(|r| r.is_active()) {
        if r.start_date.is_none() {
            warnings.push(format!(
                "Credit {} has no start date; excluded from delinquency checks.",
                r.id
            ));
        }
        if r.term_months == 0 {
            warnings.push(format!(
                "Credit {} has a zero-month term; excluded from delinquency checks.",
                r.id
            ));
        }
        if r.total_owed().is_zero() {
            warnings.push(format!(
                "Credit {} has zero total owed; excluded from interest earned.",
                r.id
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credit::record::CreditState;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let out = analyze_portfolio(&[], &PortfolioAssumptions::as_of(as_of())).unwrap();
        let s = &out.result;
        assert!(s.alerts.is_empty());
        assert!(s.savings.is_empty());
        assert_eq!(s.total_interest_earned, Decimal::ZERO);
        assert_eq!(s.percent_on_time, dec!(100));
        assert_eq!(s.distinct_active_clients, 0);
        assert!(out.warnings.is_empty());
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_degenerate_records_warned() {
        let record = CreditRecord {
            id: 5,
            client_id: 1,
            principal: Decimal::ZERO,
            annual_interest_rate: dec!(5),
            term_months: 0,
            amount_paid: Decimal::ZERO,
            accumulated_debt: Decimal::ZERO,
            state: CreditState::Accepted,
            start_date: None,
            initial_monthly_expense: None,
            final_monthly_expense: None,
            description: None,
            category: None,
            item_id: None,
            is_offer: false,
        };
        let out = analyze_portfolio(&[record], &PortfolioAssumptions::as_of(as_of())).unwrap();
        assert_eq!(out.warnings.len(), 3);
        assert_eq!(out.result.percent_on_time, dec!(100));
        assert_eq!(out.result.distinct_active_clients, 1);
    }

    #[test]
    fn test_zero_total_owed_reported_once() {
        let record = CreditRecord {
            id: 9,
            client_id: 2,
            principal: Decimal::ZERO,
            annual_interest_rate: dec!(5),
            term_months: 12,
            amount_paid: Decimal::ZERO,
            accumulated_debt: Decimal::ZERO,
            state: CreditState::Accepted,
            start_date: Some(as_of()),
            initial_monthly_expense: None,
            final_monthly_expense: None,
            description: None,
            category: None,
            item_id: None,
            is_offer: false,
        };
        let out = analyze_portfolio(&[record], &PortfolioAssumptions::as_of(as_of())).unwrap();
        let zero_owed: Vec<&String> = out
            .warnings
            .iter()
            .filter(|w| w.contains("zero total owed"))
            .collect();
        assert_eq!(zero_owed.len(), 1);
        assert_eq!(out.result.total_interest_earned, Decimal::ZERO);
    }
}
