use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{GreenCreditError, GreenCreditResult};

const DEFAULT_INTEREST_CHART_LIMIT: usize = 10;
const DEFAULT_DECISION_WINDOW_MONTHS: u32 = 6;

/// Inputs shared by every portfolio computation besides the records.
///
/// `as_of` stands in for "now" so results are reproducible; the remaining
/// fields size the dashboard series and default to what the admin
/// dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioAssumptions {
    pub as_of: NaiveDate,
    #[serde(default = "default_interest_chart_limit")]
    pub interest_chart_limit: usize,
    #[serde(default = "default_decision_window_months")]
    pub decision_window_months: u32,
}

impl PortfolioAssumptions {
    pub fn as_of(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            interest_chart_limit: DEFAULT_INTEREST_CHART_LIMIT,
            decision_window_months: DEFAULT_DECISION_WINDOW_MONTHS,
        }
    }

    pub fn validate(&self) -> GreenCreditResult<()> {
        if self.decision_window_months == 0 {
            return Err(GreenCreditError::InvalidInput {
                field: "decision_window_months".into(),
                reason: "Decision window must cover at least one month".into(),
            });
        }
        if self.decision_window_months > 120 {
            return Err(GreenCreditError::InvalidInput {
                field: "decision_window_months".into(),
                reason: "Decision window cannot exceed 120 months".into(),
            });
        }
        Ok(())
    }
}

fn default_interest_chart_limit() -> usize {
    DEFAULT_INTEREST_CHART_LIMIT
}

fn default_decision_window_months() -> u32 {
    DEFAULT_DECISION_WINDOW_MONTHS
}
