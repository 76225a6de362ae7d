//! Credit lifecycle transitions.
//!
//! ```text
//!   PENDIENTE ──approve──► APROBADO ──accept──► ACEPTADO
//!       │                     │
//!      deny                decline
//!       │                     │
//!       └──────► NEGADO ◄─────┘
//! ```
//!
//! Administrators approve or deny pending requests; the client then accepts
//! (signs) or declines an approved offer. Accepting starts the repayment
//! schedule, so it stamps the start date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::credit::record::{CreditRecord, CreditState};
use crate::{GreenCreditError, GreenCreditResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditAction {
    /// Administrator approves a pending request.
    Approve,
    /// Administrator rejects a pending request.
    Deny,
    /// Client signs an approved credit.
    Accept,
    /// Client turns down an approved credit.
    Decline,
}

impl std::fmt::Display for CreditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Approve => "approve",
            Self::Deny => "deny",
            Self::Accept => "accept",
            Self::Decline => "decline",
        };
        write!(f, "{}", s)
    }
}

/// State reached by applying `action` in state `from`.
pub fn next_state(from: CreditState, action: CreditAction) -> GreenCreditResult<CreditState> {
    use CreditAction::*;
    use CreditState::*;

    match (from, action) {
        (Pending, Approve) => Ok(Approved),
        (Pending, Deny) => Ok(Denied),
        (Approved, Accept) => Ok(Accepted),
        (Approved, Decline) => Ok(Denied),
        _ => Err(GreenCreditError::InvalidTransition {
            from,
            action: action.to_string(),
        }),
    }
}

/// Updated copy of `record` after `action`. The input is left untouched;
/// the returned record is what gets sent back to the backend.
pub fn apply_action(
    record: &CreditRecord,
    action: CreditAction,
    as_of: NaiveDate,
) -> GreenCreditResult<CreditRecord> {
    let state = next_state(record.state, action)?;
    let mut updated = record.clone();
    updated.state = state;
    if state == CreditState::Accepted {
        updated.start_date = Some(as_of);
    }
    log::debug!("credit {}: {} -> {} ({action})", record.id, record.state, state);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn pending() -> CreditRecord {
        CreditRecord {
            id: 9,
            client_id: 2,
            principal: dec!(60000),
            annual_interest_rate: dec!(6),
            term_months: 24,
            amount_paid: Decimal::ZERO,
            accumulated_debt: Decimal::ZERO,
            state: CreditState::Pending,
            start_date: None,
            initial_monthly_expense: Some(dec!(2000)),
            final_monthly_expense: Some(dec!(800)),
            description: None,
            category: None,
            item_id: None,
            is_offer: true,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_full_happy_path() {
        let approved = apply_action(&pending(), CreditAction::Approve, today()).unwrap();
        assert_eq!(approved.state, CreditState::Approved);
        assert_eq!(approved.start_date, None);

        let accepted = apply_action(&approved, CreditAction::Accept, today()).unwrap();
        assert_eq!(accepted.state, CreditState::Accepted);
        assert_eq!(accepted.start_date, Some(today()));
    }

    #[test]
    fn test_input_not_mutated() {
        let record = pending();
        let _ = apply_action(&record, CreditAction::Deny, today()).unwrap();
        assert_eq!(record.state, CreditState::Pending);
    }

    #[test]
    fn test_decline_approved() {
        assert_eq!(
            next_state(CreditState::Approved, CreditAction::Decline).unwrap(),
            CreditState::Denied
        );
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for from in [CreditState::Accepted, CreditState::Denied] {
            for action in [
                CreditAction::Approve,
                CreditAction::Deny,
                CreditAction::Accept,
                CreditAction::Decline,
            ] {
                assert!(matches!(
                    next_state(from, action),
                    Err(GreenCreditError::InvalidTransition { .. })
                ));
            }
        }
    }

    #[test]
    fn test_cannot_accept_pending() {
        let err = apply_action(&pending(), CreditAction::Accept, today()).unwrap_err();
        assert!(err.to_string().contains("accept"));
        assert!(err.to_string().contains("PENDIENTE"));
    }
}
