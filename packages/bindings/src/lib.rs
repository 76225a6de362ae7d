use chrono::{NaiveDate, NaiveDateTime};
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use green_credit_core::credit::lifecycle::CreditAction;
use green_credit_core::credit::payment::PaymentRequest;
use green_credit_core::credit::record::CreditRecord;
use green_credit_core::offers::offer::CreditOffer;
use green_credit_core::portfolio::PortfolioAssumptions;
use green_credit_core::session::{Principal, Session, SessionContext};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: for<'de> Deserialize<'de>>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn render<T: Serialize>(output: &T) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

/// `{ "records": [...], "as_of": "YYYY-MM-DD", ...other assumptions }`
#[derive(Deserialize)]
struct SnapshotInput {
    records: Vec<CreditRecord>,
    #[serde(flatten)]
    assumptions: PortfolioAssumptions,
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_portfolio(input_json: String) -> NapiResult<String> {
    let input: SnapshotInput = parse(&input_json)?;
    let output =
        green_credit_core::portfolio::summary::analyze_portfolio(&input.records, &input.assumptions)
            .map_err(to_napi_error)?;
    render(&output)
}

#[napi]
pub fn collect_delinquency_alerts(input_json: String) -> NapiResult<String> {
    let input: SnapshotInput = parse(&input_json)?;
    let alerts = green_credit_core::portfolio::delinquency::collect_delinquency_alerts(
        &input.records,
        input.assumptions.as_of,
    );
    render(&alerts)
}

#[napi]
pub fn total_interest_earned(records_json: String) -> NapiResult<String> {
    let records: Vec<CreditRecord> = parse(&records_json)?;
    render(&green_credit_core::portfolio::interest::total_interest_earned(&records))
}

#[napi]
pub fn compute_savings_per_credit(records_json: String) -> NapiResult<String> {
    let records: Vec<CreditRecord> = parse(&records_json)?;
    render(&green_credit_core::portfolio::savings::compute_savings_per_credit(&records))
}

#[napi]
pub fn percent_on_time(input_json: String) -> NapiResult<String> {
    let input: SnapshotInput = parse(&input_json)?;
    render(&green_credit_core::portfolio::stats::percent_on_time(
        &input.records,
        input.assumptions.as_of,
    ))
}

#[napi]
pub fn distinct_clients_with_active_credit(records_json: String) -> NapiResult<u32> {
    let records: Vec<CreditRecord> = parse(&records_json)?;
    let count = green_credit_core::portfolio::stats::distinct_clients_with_active_credit(&records);
    u32::try_from(count).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[napi]
pub fn portfolio_breakdown(input_json: String) -> NapiResult<String> {
    let input: SnapshotInput = parse(&input_json)?;
    let output = green_credit_core::analytics::breakdown::portfolio_breakdown(
        &input.records,
        &input.assumptions,
    )
    .map_err(to_napi_error)?;
    render(&output)
}

// ---------------------------------------------------------------------------
// Offers
// ---------------------------------------------------------------------------

#[napi]
pub fn offer_terms(offer_json: String) -> NapiResult<String> {
    let offer: CreditOffer = parse(&offer_json)?;
    let terms = green_credit_core::offers::offer::offer_terms(&offer).map_err(to_napi_error)?;
    render(&terms)
}

#[napi]
pub fn validate_offers(offers_json: String) -> NapiResult<String> {
    let offers: Vec<CreditOffer> = parse(&offers_json)?;
    let output =
        green_credit_core::offers::validation::validate_offers(&offers).map_err(to_napi_error)?;
    render(&output)
}

// ---------------------------------------------------------------------------
// Credit lifecycle
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TransitionInput {
    credit: CreditRecord,
    action: CreditAction,
    as_of: NaiveDate,
}

#[napi]
pub fn apply_credit_action(input_json: String) -> NapiResult<String> {
    let input: TransitionInput = parse(&input_json)?;
    let updated =
        green_credit_core::credit::lifecycle::apply_action(&input.credit, input.action, input.as_of)
            .map_err(to_napi_error)?;
    render(&updated)
}

#[derive(Deserialize)]
struct PaymentInput {
    credit: CreditRecord,
    payment: PaymentRequest,
    #[serde(alias = "saldo")]
    balance: Decimal,
}

#[napi]
pub fn apply_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentInput = parse(&input_json)?;
    let outcome =
        green_credit_core::credit::payment::apply_payment(&input.credit, &input.payment, input.balance)
            .map_err(to_napi_error)?;
    render(&outcome)
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------
// The host keeps the serialized `SessionContext` (e.g. in local storage) and
// passes it back on each call.

#[derive(Deserialize)]
struct LoginInput {
    #[serde(default)]
    context: SessionContext,
    principal: Principal,
    at: NaiveDateTime,
}

#[napi]
pub fn session_login(input_json: String) -> NapiResult<String> {
    let mut input: LoginInput = parse(&input_json)?;
    input.context.login(input.principal, input.at);
    render(&input.context)
}

#[derive(Serialize)]
struct LogoutOutput {
    context: SessionContext,
    ended: Option<Session>,
}

#[napi]
pub fn session_logout(context_json: String) -> NapiResult<String> {
    let mut context: SessionContext = parse(&context_json)?;
    let ended = context.logout();
    render(&LogoutOutput { context, ended })
}

#[napi]
pub fn session_require_admin(context_json: String) -> NapiResult<String> {
    let context: SessionContext = parse(&context_json)?;
    let session = context.require_admin().map_err(to_napi_error)?;
    render(session)
}
