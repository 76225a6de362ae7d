use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::credit::record::CreditRecord;
use crate::{types::*, GreenCreditError, GreenCreditResult};

/// A client's request to pay part of a credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(alias = "credito_id")]
    pub credit_id: i64,
    #[serde(alias = "cliente_id")]
    pub client_id: i64,
    #[serde(alias = "monto")]
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub credit: CreditRecord,
    pub remaining_balance: Money,
    pub outstanding_principal: Money,
}

/// Validate a payment against the credit and the client's account balance
/// and return the updated credit.
///
/// Rules: the credit must belong to the paying client, the amount must be
/// positive, covered by the balance, and no larger than the outstanding
/// principal.
pub fn apply_payment(
    record: &CreditRecord,
    request: &PaymentRequest,
    client_balance: Money,
) -> GreenCreditResult<PaymentOutcome> {
    if request.credit_id != record.id || request.client_id != record.client_id {
        return Err(GreenCreditError::PaymentRejected(format!(
            "credit {} not found for client {}",
            request.credit_id, request.client_id
        )));
    }
    if request.amount <= Decimal::ZERO {
        return Err(GreenCreditError::InvalidInput {
            field: "amount".into(),
            reason: "Payment amount must be greater than zero".into(),
        });
    }
    if client_balance < request.amount {
        return Err(GreenCreditError::PaymentRejected(format!(
            "insufficient funds: balance {client_balance}, payment {}",
            request.amount
        )));
    }
    let outstanding = record.outstanding_principal();
    if request.amount > outstanding {
        return Err(GreenCreditError::PaymentRejected(format!(
            "payment {} exceeds outstanding principal {outstanding}",
            request.amount
        )));
    }

    let mut credit = record.clone();
    credit.amount_paid += request.amount;
    log::debug!(
        "credit {}: paid {} (total {})",
        credit.id,
        request.amount,
        credit.amount_paid
    );

    Ok(PaymentOutcome {
        outstanding_principal: credit.outstanding_principal(),
        remaining_balance: client_balance - request.amount,
        credit,
    })
}
