use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::GreenCreditError;
use crate::types::{Money, Percent};
use crate::GreenCreditResult;

/// Fixed month length used when converting elapsed days into months.
pub const DAYS_PER_MONTH: u32 = 30;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Whole months between `start` and `as_of`, using a fixed-length month.
///
/// Approximates calendar months; a start date in the future yields zero.
pub fn months_elapsed(start: NaiveDate, as_of: NaiveDate, days_per_month: u32) -> u32 {
    if days_per_month == 0 {
        return 0;
    }
    let days = (as_of - start).num_days();
    let months = days.div_euclid(i64::from(days_per_month)).max(0);
    u32::try_from(months).unwrap_or(u32::MAX)
}

/// Principal plus flat interest spread evenly over the term.
pub fn flat_monthly_payment(
    principal: Money,
    annual_rate_pct: Percent,
    months: u32,
) -> GreenCreditResult<Money> {
    if months == 0 {
        return Err(GreenCreditError::DivisionByZero {
            context: "flat monthly payment over a zero-month term".into(),
        });
    }
    let total = principal
        .checked_mul(Decimal::ONE + annual_rate_pct / dec!(100))
        .ok_or_else(|| overflow("flat monthly payment"))?;
    Ok(total / Decimal::from(months))
}

/// Level annuity payment for a fully amortising loan.
///
/// `P·r / (1 − (1 + r)^−n)` with `r` the monthly rate; `P / n` when the
/// rate is zero.
pub fn amortized_monthly_payment(
    principal: Money,
    annual_rate_pct: Percent,
    months: u32,
) -> GreenCreditResult<Money> {
    if months == 0 {
        return Err(GreenCreditError::DivisionByZero {
            context: "amortized payment over a zero-month term".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(GreenCreditError::InvalidInput {
            field: "annual_interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let n = Decimal::from(months);
    let r = monthly_rate(annual_rate_pct);
    if r.is_zero() {
        return Ok(principal / n);
    }

    let growth = (Decimal::ONE + r)
        .checked_powu(u64::from(months))
        .ok_or_else(|| overflow("amortization factor"))?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(GreenCreditError::DivisionByZero {
            context: "amortization factor".into(),
        });
    }
    principal
        .checked_mul(r)
        .and_then(|x| x.checked_mul(growth))
        .and_then(|x| x.checked_div(denominator))
        .ok_or_else(|| overflow("amortized monthly payment"))
}

fn overflow(what: &str) -> GreenCreditError {
    GreenCreditError::InvalidInput {
        field: "annual_interest_rate".into(),
        reason: format!("{what} overflows decimal range; rate or term too large"),
    }
}

/// Months needed to repay `principal` with a fixed monthly `payment`.
///
/// Returns `None` when the payment does not cover the first month's
/// interest (the balance would never shrink).
pub fn months_to_repay(principal: Money, annual_rate_pct: Percent, payment: Money) -> Option<u32> {
    if payment <= Decimal::ZERO || principal < Decimal::ZERO {
        return None;
    }
    if principal.is_zero() {
        return Some(0);
    }

    let r = monthly_rate(annual_rate_pct);
    let months = if r.is_zero() {
        principal.checked_div(payment)?.ceil()
    } else {
        let ratio = Decimal::ONE - r.checked_mul(principal)?.checked_div(payment)?;
        if ratio <= Decimal::ZERO {
            return None;
        }
        let denominator = (Decimal::ONE + r).checked_ln()?;
        if denominator.is_zero() {
            return None;
        }
        (-ratio.checked_ln()? / denominator).ceil()
    };

    months.to_u32()
}

fn monthly_rate(annual_rate_pct: Percent) -> Decimal {
    annual_rate_pct / dec!(100) / MONTHS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_months_elapsed_uses_thirty_day_months() {
        assert_eq!(months_elapsed(date(2025, 1, 1), date(2025, 1, 30), 30), 0);
        assert_eq!(months_elapsed(date(2025, 1, 1), date(2025, 1, 31), 30), 1);
        // 365 days / 30 = 12.17 -> 12
        assert_eq!(months_elapsed(date(2024, 1, 1), date(2024, 12, 31), 30), 12);
    }

    #[test]
    fn test_months_elapsed_future_start_clamped() {
        assert_eq!(months_elapsed(date(2026, 6, 1), date(2026, 1, 1), 30), 0);
    }

    #[test]
    fn test_flat_payment() {
        let p = flat_monthly_payment(dec!(50000), dec!(8.5), 24).unwrap();
        assert_eq!(p.round_dp(2), dec!(2260.42));
    }

    #[test]
    fn test_flat_payment_zero_term() {
        assert!(matches!(
            flat_monthly_payment(dec!(1000), dec!(5), 0),
            Err(GreenCreditError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_amortized_payment_solar_loan() {
        // 120k at 6% over 36 months
        let p = amortized_monthly_payment(dec!(120000), dec!(6), 36).unwrap();
        assert_eq!(p.round_dp(2), dec!(3650.63));
    }

    #[test]
    fn test_amortized_payment_zero_rate() {
        let p = amortized_monthly_payment(dec!(12000), Decimal::ZERO, 24).unwrap();
        assert_eq!(p, dec!(500));
    }

    #[test]
    fn test_amortized_payment_overflow_is_error() {
        // (1 + 1000%/12)^120 is far beyond the decimal range
        assert!(matches!(
            amortized_monthly_payment(dec!(50000), dec!(1000), 120),
            Err(GreenCreditError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_months_to_repay_zero_rate() {
        assert_eq!(months_to_repay(dec!(10000), Decimal::ZERO, dec!(500)), Some(20));
    }

    #[test]
    fn test_months_to_repay_payment_too_low() {
        // Monthly interest on 10k at 12% is 100; a 50 payment never amortises.
        assert_eq!(months_to_repay(dec!(10000), dec!(12), dec!(50)), None);
    }

    #[test]
    fn test_months_to_repay_short_term() {
        assert_eq!(months_to_repay(dec!(1000), dec!(6), dec!(500)), Some(3));
    }

    #[test]
    fn test_months_to_repay_consistent_with_payment() {
        let months = months_to_repay(dec!(60000), dec!(6), dec!(1800)).unwrap();
        let payment = amortized_monthly_payment(dec!(60000), dec!(6), months).unwrap();
        assert!(payment <= dec!(1800));
        let shorter = amortized_monthly_payment(dec!(60000), dec!(6), months - 1).unwrap();
        assert!(shorter > dec!(1800));
    }
}
