//! Balance HTTP handlers.
//!
//! This module implements the balance API endpoints:
//! - GET /balance-info - Current balance of a user
//! - POST /up-balance - Credit a positive amount to a user

use axum::{Json, body::Bytes, extract::State};
use serde::de::DeserializeOwned;

use crate::{
    domain::{validate_account_id, validate_query_account_id, validate_top_up_amount},
    error::AppError,
    models::balance::{
        BalanceInfoRequest, BalanceInfoResponse, TopUpRequest, TopUpResponse, raw_text,
    },
    routes::AppState,
};

/// Decode a JSON body whatever its `Content-Type`; existing clients send none.
fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::InvalidRequest(e.to_string()))
}

/// Get the balance of a user.
///
/// # Request Body
///
/// ```json
/// { "id": "1" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"user id": 1, "balance": 830.55}`
/// - **Error (400)**: invalid id, unknown user, or undecodable body
/// - **Error (500)**: storage failure
pub async fn balance_info(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BalanceInfoResponse>, AppError> {
    let request: BalanceInfoRequest = decode(&body)?;

    let account_id =
        validate_query_account_id(&raw_text(&request.id)).map_err(AppError::balance_info)?;

    let ctx = state.request_context();
    let account = state
        .service
        .get_balance(&ctx, account_id)
        .await
        .map_err(AppError::balance_info)?;

    Ok(Json(account.into()))
}

/// Top up the balance of a user.
///
/// # Request Body
///
/// ```json
/// { "id": "1", "amount": "1000.55" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"user id": 1, "top up an amount": 1000.55}`
/// - **Error (400)**: invalid id or amount, unknown user, or undecodable body
/// - **Error (500)**: storage failure
///
/// Both values are validated before the service is called, so a bad request
/// never reaches storage.
pub async fn up_balance(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TopUpResponse>, AppError> {
    let request: TopUpRequest = decode(&body)?;

    let account_id = validate_account_id(&raw_text(&request.id)).map_err(AppError::top_up)?;
    let amount = validate_top_up_amount(&raw_text(&request.amount)).map_err(AppError::top_up)?;

    let ctx = state.request_context();
    state
        .service
        .top_up(&ctx, account_id, amount)
        .await
        .map_err(AppError::top_up)?;

    Ok(Json(TopUpResponse {
        user_id: account_id.get(),
        amount: amount.value(),
    }))
}
