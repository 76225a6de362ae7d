#![cfg(all(feature = "lifecycle", feature = "portfolio"))]

use chrono::NaiveDate;
use green_credit_core::credit::lifecycle::{apply_action, CreditAction};
use green_credit_core::credit::payment::{apply_payment, PaymentRequest};
use green_credit_core::credit::record::{CreditRecord, CreditState};
use green_credit_core::portfolio::delinquency::is_delinquent;
use green_credit_core::GreenCreditError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn request_from_backend() -> CreditRecord {
    serde_json::from_str(
        r#"{"id_cred": 21, "cliente_id": 5, "prestamo": 12000, "interes": 0,
            "meses_originales": 12, "pagado": 0, "estado": "PENDIENTE",
            "descripcion": "Calentador solar", "categoria": "Agua", "oferta": true}"#,
    )
    .unwrap()
}

// ===========================================================================
// Request -> approval -> signature -> repayment
// ===========================================================================

#[test]
fn test_credit_becomes_active_only_after_acceptance() {
    let pending = request_from_backend();
    assert!(!pending.is_active());

    let approved = apply_action(&pending, CreditAction::Approve, day(2026, 1, 5)).unwrap();
    assert!(!approved.is_active());

    let accepted = apply_action(&approved, CreditAction::Accept, day(2026, 1, 10)).unwrap();
    assert!(accepted.is_active());
    assert_eq!(accepted.start_date, Some(day(2026, 1, 10)));

    // Two 30-day months later, 2000 is expected and nothing has been paid.
    assert!(is_delinquent(&accepted, day(2026, 3, 11)));

    let payment = PaymentRequest {
        credit_id: 21,
        client_id: 5,
        amount: dec!(2000),
    };
    let outcome = apply_payment(&accepted, &payment, dec!(5000)).unwrap();
    assert_eq!(outcome.remaining_balance, dec!(3000));
    assert!(!is_delinquent(&outcome.credit, day(2026, 3, 11)));
}

#[test]
fn test_denied_credit_cannot_be_accepted() {
    let denied = apply_action(&request_from_backend(), CreditAction::Deny, day(2026, 1, 5)).unwrap();
    assert_eq!(denied.state, CreditState::Denied);
    let err = apply_action(&denied, CreditAction::Accept, day(2026, 1, 6)).unwrap_err();
    assert!(matches!(err, GreenCreditError::InvalidTransition { from: CreditState::Denied, .. }));
}

#[test]
fn test_payments_cannot_exceed_principal() {
    let mut credit = request_from_backend();
    credit.amount_paid = dec!(11999);
    let payment = PaymentRequest {
        credit_id: 21,
        client_id: 5,
        amount: dec!(2),
    };
    assert!(apply_payment(&credit, &payment, dec!(100)).is_err());

    let exact = PaymentRequest {
        amount: Decimal::ONE,
        ..payment
    };
    let outcome = apply_payment(&credit, &exact, dec!(100)).unwrap();
    assert_eq!(outcome.outstanding_principal, Decimal::ZERO);
}
