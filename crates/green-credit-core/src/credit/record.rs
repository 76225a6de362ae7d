use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::*;

// ---------------------------------------------------------------------------
// Credit state
// ---------------------------------------------------------------------------

/// Lifecycle tag set by the backend.
///
/// Serialized with the backend's Spanish tags; the English names are
/// accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditState {
    #[serde(rename = "PENDIENTE", alias = "PENDING")]
    Pending,
    #[serde(rename = "APROBADO", alias = "APPROVED")]
    Approved,
    #[serde(rename = "ACEPTADO", alias = "ACCEPTED")]
    Accepted,
    #[serde(rename = "NEGADO", alias = "DENIED")]
    Denied,
}

impl CreditState {
    /// Only accepted credits are active: signed by the client and accruing
    /// expected payments.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Accepted and denied credits never change state again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Denied)
    }
}

impl std::fmt::Display for CreditState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDIENTE",
            Self::Approved => "APROBADO",
            Self::Accepted => "ACEPTADO",
            Self::Denied => "NEGADO",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Credit record
// ---------------------------------------------------------------------------

/// A credit as returned by the backend's `/creditos` endpoint.
///
/// Field aliases accept the backend's column names verbatim, so a snapshot
/// can be deserialized without any reshaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRecord {
    #[serde(alias = "id_cred")]
    pub id: i64,
    #[serde(alias = "cliente_id")]
    pub client_id: i64,
    #[serde(alias = "prestamo")]
    pub principal: Money,
    #[serde(alias = "interes")]
    pub annual_interest_rate: Percent,
    #[serde(alias = "meses_originales")]
    pub term_months: u32,
    #[serde(default, alias = "pagado")]
    pub amount_paid: Money,
    #[serde(default, alias = "deuda_acumulada")]
    pub accumulated_debt: Money,
    #[serde(alias = "estado")]
    pub state: CreditState,
    #[serde(default, alias = "fecha_inicio")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, alias = "gasto_inicial_mes")]
    pub initial_monthly_expense: Option<Money>,
    #[serde(default, alias = "gasto_final_mes")]
    pub final_monthly_expense: Option<Money>,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
    #[serde(default, alias = "categoria")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
    #[serde(default, alias = "oferta")]
    pub is_offer: bool,
}

impl CreditRecord {
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Principal plus flat interest: `principal × (1 + rate/100)`.
    pub fn total_owed(&self) -> Money {
        self.principal * (Decimal::ONE + self.annual_interest_rate / dec!(100))
    }

    /// Flat interest portion: `principal × rate/100`.
    pub fn interest_portion(&self) -> Money {
        self.principal * (self.annual_interest_rate / dec!(100))
    }

    /// Total owed spread evenly over the original term. `None` for a zero term.
    pub fn flat_monthly_payment(&self) -> Option<Money> {
        if self.term_months == 0 {
            return None;
        }
        Some(self.total_owed() / Decimal::from(self.term_months))
    }

    /// Principal not yet covered by payments. Interest is not included,
    /// matching the ceiling the backend enforces on payments.
    pub fn outstanding_principal(&self) -> Money {
        self.principal - self.amount_paid
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
