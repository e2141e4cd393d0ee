use napi::Result as NapiResult;
use napi_derive::napi;

use settlement_core::display::statement::{self, SettlementStatement};
use settlement_core::settlement::{batch, calculator, request};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_settlement(input_json: String) -> NapiResult<String> {
    let input: request::SettlementInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculator::settle(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn settle_batch(input_json: String) -> NapiResult<String> {
    let input: batch::BatchInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = batch::settle_batch(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Settle and return the display statement together with its notices.
#[napi]
pub fn settlement_statement(input_json: String) -> NapiResult<String> {
    let input: request::SettlementInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let req = input.to_request().map_err(to_napi_error)?;
    let output = calculator::settle(&input).map_err(to_napi_error)?;
    let view = serde_json::json!({
        "notices": statement::notices(&req),
        "statement": SettlementStatement::from_result(&output.result),
    });
    serde_json::to_string(&view).map_err(to_napi_error)
}

#[napi]
pub fn amount_caption(amount: i64) -> NapiResult<String> {
    let amount = u64::try_from(amount)
        .map_err(|_| to_napi_error(format!("amount must be non-negative, got {amount}")))?;
    Ok(statement::amount_caption(amount))
}
