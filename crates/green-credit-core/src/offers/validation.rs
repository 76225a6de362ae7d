use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::offers::offer::CreditOffer;
use crate::time_value::{amortized_monthly_payment, months_to_repay};
use crate::{types::*, GreenCreditResult};

/// Longest term a green credit may run.
pub const MAX_TERM_MONTHS: u32 = 120;

/// Result of checking one generated offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OfferValidation {
    /// Term and payment already fit.
    Accepted {
        offer: CreditOffer,
        monthly_payment: Money,
    },
    /// Term rewritten so the payment fits the client's budget.
    Corrected {
        offer: CreditOffer,
        original_term_months: u32,
        monthly_payment: Money,
    },
    /// No term up to the maximum makes the offer affordable.
    Rejected { offer: CreditOffer, reason: String },
}

impl OfferValidation {
    /// The offer to keep, if any.
    pub fn kept(&self) -> Option<&CreditOffer> {
        match self {
            Self::Accepted { offer, .. } | Self::Corrected { offer, .. } => Some(offer),
            Self::Rejected { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferBatch {
    pub offers: Vec<CreditOffer>,
    pub validations: Vec<OfferValidation>,
    pub accepted: usize,
    pub corrected: usize,
    pub rejected: usize,
}

/// Check an offer's amortised payment against what the client can afford.
///
/// The affordable payment is the client's current monthly expense in the
/// category, which the credit payment replaces. When the payment is too
/// high, or the term is zero or above [`MAX_TERM_MONTHS`], the term is
/// recomputed as the shortest one whose payment fits. Offers without a
/// current expense are only held to the maximum term.
pub fn validate_offer(offer: &CreditOffer) -> GreenCreditResult<OfferValidation> {
    offer.validate()?;
    let affordable = offer.initial_monthly_expense;

    if affordable <= Decimal::ZERO {
        let term = offer.term_months.clamp(1, MAX_TERM_MONTHS);
        let monthly_payment =
            amortized_monthly_payment(offer.principal, offer.annual_interest_rate, term)?;
        if term == offer.term_months {
            return Ok(OfferValidation::Accepted {
                offer: offer.clone(),
                monthly_payment,
            });
        }
        return Ok(corrected(offer, term, monthly_payment));
    }

    if (1..=MAX_TERM_MONTHS).contains(&offer.term_months) {
        // An out-of-range payment is unaffordable; the term search below rejects it.
        match amortized_monthly_payment(
            offer.principal,
            offer.annual_interest_rate,
            offer.term_months,
        ) {
            Ok(monthly_payment) if monthly_payment <= affordable => {
                return Ok(OfferValidation::Accepted {
                    offer: offer.clone(),
                    monthly_payment,
                });
            }
            Ok(_) => {}
            Err(e) => log::debug!("offer payment not computable: {e}"),
        }
    }

    match months_to_repay(offer.principal, offer.annual_interest_rate, affordable) {
        Some(months) if (1..=MAX_TERM_MONTHS).contains(&months) => {
            let monthly_payment =
                amortized_monthly_payment(offer.principal, offer.annual_interest_rate, months)?;
            Ok(corrected(offer, months, monthly_payment))
        }
        Some(months) => Ok(OfferValidation::Rejected {
            offer: offer.clone(),
            reason: format!(
                "needs {months} months at {affordable}/month, above the {MAX_TERM_MONTHS}-month limit"
            ),
        }),
        None => Ok(OfferValidation::Rejected {
            offer: offer.clone(),
            reason: format!("{affordable}/month does not cover the monthly interest"),
        }),
    }
}

/// Validate a batch of generated offers, keeping accepted and corrected ones.
pub fn validate_offers(offers: &[CreditOffer]) -> GreenCreditResult<ComputationOutput<OfferBatch>> {
    let start = Instant::now();
    let mut warnings = Vec::new();
    let mut validations = Vec::with_capacity(offers.len());

    for (i, offer) in offers.iter().enumerate() {
        let validation = match validate_offer(offer) {
            Ok(v) => v,
            Err(e) => OfferValidation::Rejected {
                offer: offer.clone(),
                reason: e.to_string(),
            },
        };
        match &validation {
            OfferValidation::Corrected {
                offer: fixed,
                original_term_months,
                ..
            } => warnings.push(format!(
                "Offer {}: term corrected from {} to {} months.",
                i + 1,
                original_term_months,
                fixed.term_months
            )),
            OfferValidation::Rejected { reason, .. } => {
                warnings.push(format!("Offer {} rejected: {}.", i + 1, reason))
            }
            OfferValidation::Accepted { .. } => {}
        }
        validations.push(validation);
    }

    let count = |pred: fn(&OfferValidation) -> bool| validations.iter().filter(|&v| pred(v)).count();
    let batch = OfferBatch {
        offers: validations.iter().filter_map(|v| v.kept().cloned()).collect(),
        accepted: count(|v| matches!(v, OfferValidation::Accepted { .. })),
        corrected: count(|v| matches!(v, OfferValidation::Corrected { .. })),
        rejected: count(|v| matches!(v, OfferValidation::Rejected { .. })),
        validations,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortised payment affordability check (max 120 months)",
        &serde_json::json!({ "max_term_months": MAX_TERM_MONTHS }),
        warnings,
        elapsed,
        batch,
    ))
}

fn corrected(offer: &CreditOffer, term: u32, monthly_payment: Money) -> OfferValidation {
    let mut fixed = offer.clone();
    fixed.term_months = term;
    OfferValidation::Corrected {
        offer: fixed,
        original_term_months: offer.term_months,
        monthly_payment,
    }
}
