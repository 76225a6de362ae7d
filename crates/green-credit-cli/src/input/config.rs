use chrono::{Local, NaiveDate};
use serde::Deserialize;

use green_credit_core::portfolio::PortfolioAssumptions;

use super::file;

/// `--config` file contents. Every field is optional; missing ones fall back
/// to the dashboard defaults and `as_of` to today.
///
/// ```yaml
/// as_of: 2026-10-16
/// interest_chart_limit: 10
/// decision_window_months: 6
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AssumptionsFile {
    as_of: Option<NaiveDate>,
    interest_chart_limit: Option<usize>,
    decision_window_months: Option<u32>,
}

/// Build the portfolio assumptions from the optional config file, with
/// `--as-of` taking precedence over the file.
pub fn load_assumptions(
    config: Option<&str>,
    as_of: Option<NaiveDate>,
) -> Result<PortfolioAssumptions, Box<dyn std::error::Error>> {
    let from_file: AssumptionsFile = match config {
        Some(path) => file::read_yaml(path)?,
        None => AssumptionsFile::default(),
    };

    let as_of = as_of
        .or(from_file.as_of)
        .unwrap_or_else(|| Local::now().date_naive());
    let mut assumptions = PortfolioAssumptions::as_of(as_of);
    if let Some(limit) = from_file.interest_chart_limit {
        assumptions.interest_chart_limit = limit;
    }
    if let Some(months) = from_file.decision_window_months {
        assumptions.decision_window_months = months;
    }
    assumptions.validate()?;

    log::debug!("portfolio assumptions: {assumptions:?}");
    Ok(assumptions)
}
