use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::credit::record::{CreditRecord, CreditState};
use crate::portfolio::assumptions::PortfolioAssumptions;
use crate::{types::*, GreenCreditError, GreenCreditResult};

const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

const UNCATEGORISED: &str = "Otro";

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_principal: Money,
    pub credits: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBucket {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDecisions {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub accepted: usize,
    pub denied: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioBreakdown {
    pub lending_by_category: Vec<CategoryTotal>,
    pub interest_rate_distribution: Vec<RateBucket>,
    pub monthly_decisions: Vec<MonthlyDecisions>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Display name for a backend category. The electricity category is shown
/// as solar energy, which is what every credit in it finances.
pub fn display_category(category: Option<&str>) -> String {
    match category {
        Some("Luz") => "Energía Solar".to_string(),
        Some(c) if !c.trim().is_empty() => c.to_string(),
        _ => UNCATEGORISED.to_string(),
    }
}

/// Interest-rate bucket label for the distribution chart.
pub fn rate_bucket(rate: Percent) -> &'static str {
    if rate < dec!(6) {
        "4-6%"
    } else if rate < dec!(8) {
        "6-8%"
    } else if rate < dec!(10) {
        "8-10%"
    } else if rate < dec!(12) {
        "10-12%"
    } else if rate < dec!(14) {
        "12-14%"
    } else {
        "14%+"
    }
}

/// Principal lent per display category across active credits, in the order
/// categories first appear.
pub fn lending_by_category(records: &[CreditRecord]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for r in records.iter().filter(|r| r.is_active()) {
        let category = display_category(r.category.as_deref());
        match totals.iter_mut().find(|t| t.category == category) {
            Some(t) => {
                t.total_principal += r.principal;
                t.credits += 1;
            }
            None => totals.push(CategoryTotal {
                category,
                total_principal: r.principal,
                credits: 1,
            }),
        }
    }
    totals
}

/// Active credits per interest-rate bucket, in the order buckets first appear.
pub fn interest_rate_distribution(records: &[CreditRecord]) -> Vec<RateBucket> {
    let mut buckets: Vec<RateBucket> = Vec::new();
    for r in records.iter().filter(|r| r.is_active()) {
        let range = rate_bucket(r.annual_interest_rate);
        match buckets.iter_mut().find(|b| b.range == range) {
            Some(b) => b.count += 1,
            None => buckets.push(RateBucket {
                range: range.to_string(),
                count: 1,
            }),
        }
    }
    buckets
}

/// Accepted and denied credits per calendar month over the `months` months
/// ending with the month of `as_of`, oldest first.
///
/// Credits are attributed to the month of their start date; credits without
/// one, or outside the window, are not counted.
pub fn monthly_decisions(
    records: &[CreditRecord],
    as_of: NaiveDate,
    months: u32,
) -> GreenCreditResult<Vec<MonthlyDecisions>> {
    let current = as_of
        .with_day(1)
        .ok_or_else(|| GreenCreditError::DateError(format!("no first day for {as_of}")))?;

    let mut window = Vec::with_capacity(months as usize);
    for back in (0..months).rev() {
        let month_start = current.checked_sub_months(Months::new(back)).ok_or_else(|| {
            GreenCreditError::DateError(format!("{back} months before {current} is out of range"))
        })?;
        window.push(MonthlyDecisions {
            year: month_start.year(),
            month: month_start.month(),
            label: MONTH_LABELS[month_start.month0() as usize].to_string(),
            accepted: 0,
            denied: 0,
        });
    }

    for r in records {
        let Some(start) = r.start_date else {
            continue;
        };
        let Some(slot) = window
            .iter_mut()
            .find(|m| m.year == start.year() && m.month == start.month())
        else {
            continue;
        };
        match r.state {
            CreditState::Accepted => slot.accepted += 1,
            CreditState::Denied => slot.denied += 1,
            CreditState::Pending | CreditState::Approved => {}
        }
    }

    Ok(window)
}

/// All admin chart series for one snapshot, wrapped in the output envelope.
pub fn portfolio_breakdown(
    records: &[CreditRecord],
    assumptions: &PortfolioAssumptions,
) -> GreenCreditResult<ComputationOutput<PortfolioBreakdown>> {
    let start = Instant::now();
    assumptions.validate()?;

    let mut warnings = Vec::new();
    let undated = records.iter().filter(|r| r.start_date.is_none()).count();
    if undated > 0 {
        warnings.push(format!(
            "{undated} credit(s) have no start date and are missing from the monthly series."
        ));
    }

    let breakdown = PortfolioBreakdown {
        lending_by_category: lending_by_category(records),
        interest_rate_distribution: interest_rate_distribution(records),
        monthly_decisions: monthly_decisions(
            records,
            assumptions.as_of,
            assumptions.decision_window_months,
        )?,
    };

    let total_lent: Decimal = breakdown
        .lending_by_category
        .iter()
        .map(|c| c.total_principal)
        .sum();
    log::debug!(
        "breakdown: {} categories, {} lent",
        breakdown.lending_by_category.len(),
        total_lent
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Active lending by category, rate distribution, monthly decisions",
        assumptions,
        warnings,
        elapsed,
        breakdown,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(
        id: i64,
        state: CreditState,
        category: Option<&str>,
        rate: Decimal,
        start: Option<NaiveDate>,
    ) -> CreditRecord {
        CreditRecord {
            id,
            client_id: id,
            principal: dec!(10000),
            annual_interest_rate: rate,
            term_months: 12,
            amount_paid: Decimal::ZERO,
            accumulated_debt: Decimal::ZERO,
            state,
            start_date: start,
            initial_monthly_expense: None,
            final_monthly_expense: None,
            description: None,
            category: category.map(str::to_string),
            item_id: None,
            is_offer: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_display_category() {
        assert_eq!(display_category(Some("Luz")), "Energía Solar");
        assert_eq!(display_category(Some("Agua")), "Agua");
        assert_eq!(display_category(Some("  ")), "Otro");
        assert_eq!(display_category(None), "Otro");
    }

    #[test]
    fn test_rate_buckets() {
        assert_eq!(rate_bucket(dec!(3.5)), "4-6%");
        assert_eq!(rate_bucket(dec!(6)), "6-8%");
        assert_eq!(rate_bucket(dec!(8.9)), "8-10%");
        assert_eq!(rate_bucket(dec!(13.99)), "12-14%");
        assert_eq!(rate_bucket(dec!(14)), "14%+");
    }

    #[test]
    fn test_lending_by_category_only_active() {
        let records = vec![
            record(1, CreditState::Accepted, Some("Luz"), dec!(5), None),
            record(2, CreditState::Accepted, Some("Transporte"), dec!(7), None),
            record(3, CreditState::Pending, Some("Luz"), dec!(5), None),
            record(4, CreditState::Accepted, Some("Luz"), dec!(9), None),
        ];
        let totals = lending_by_category(&records);
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Energía Solar".into(),
                    total_principal: dec!(20000),
                    credits: 2,
                },
                CategoryTotal {
                    category: "Transporte".into(),
                    total_principal: dec!(10000),
                    credits: 1,
                },
            ]
        );
    }

    #[test]
    fn test_interest_rate_distribution() {
        let records = vec![
            record(1, CreditState::Accepted, None, dec!(8.5), None),
            record(2, CreditState::Accepted, None, dec!(4.5), None),
            record(3, CreditState::Accepted, None, dec!(9.9), None),
            record(4, CreditState::Denied, None, dec!(15), None),
        ];
        let dist = interest_rate_distribution(&records);
        assert_eq!(
            dist,
            vec![
                RateBucket { range: "8-10%".into(), count: 2 },
                RateBucket { range: "4-6%".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_monthly_decisions_window() {
        let records = vec![
            record(1, CreditState::Accepted, None, dec!(5), date(2026, 10, 2)),
            record(2, CreditState::Denied, None, dec!(5), date(2026, 10, 9)),
            record(3, CreditState::Accepted, None, dec!(5), date(2026, 5, 30)),
            // Same month, previous year: outside the window
            record(4, CreditState::Accepted, None, dec!(5), date(2025, 10, 2)),
            record(5, CreditState::Pending, None, dec!(5), date(2026, 9, 1)),
            record(6, CreditState::Accepted, None, dec!(5), None),
        ];
        let months = monthly_decisions(&records, date(2026, 10, 16).unwrap(), 6).unwrap();
        let labels: Vec<&str> = months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["May", "Jun", "Jul", "Ago", "Sep", "Oct"]);
        assert_eq!(months[0].accepted, 1);
        assert_eq!(months[5].accepted, 1);
        assert_eq!(months[5].denied, 1);
        assert_eq!(months[4].accepted + months[4].denied, 0);
    }

    #[test]
    fn test_monthly_decisions_crosses_year() {
        let months = monthly_decisions(&[], date(2026, 2, 10).unwrap(), 3).unwrap();
        let keys: Vec<(i32, u32)> = months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(keys, vec![(2025, 12), (2026, 1), (2026, 2)]);
    }

    #[test]
    fn test_breakdown_warns_on_undated() {
        let records = vec![record(1, CreditState::Accepted, Some("Luz"), dec!(5), None)];
        let assumptions = PortfolioAssumptions::as_of(date(2026, 10, 16).unwrap());
        let out = portfolio_breakdown(&records, &assumptions).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.monthly_decisions.len(), 6);
    }
}
