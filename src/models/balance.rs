//! Balance API request/response types.
//!
//! Field names follow the API existing clients already speak, spaces
//! included (`"user id"`, `"top up an amount"`). Amounts are written as JSON
//! numbers with every digit of the decimal, never through `f64`.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::AccountBalance;

/// Text of a request value, as handed to the validators.
///
/// Clients send ids and amounts as JSON strings (`"1000.55"`); plain JSON
/// numbers are accepted too and keep their exact digits. A missing field,
/// `null`, or any other JSON type yields empty text, which fails validation.
pub fn raw_text(value: &Option<Value>) -> Cow<'_, str> {
    match value {
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        _ => Cow::Borrowed(""),
    }
}

/// Body of `GET /balance-info`.
///
/// ```json
/// { "id": "1" }
/// ```
#[derive(Debug, Deserialize)]
pub struct BalanceInfoRequest {
    #[serde(default)]
    pub id: Option<Value>,
}

/// Body of `POST /up-balance`.
///
/// ```json
/// { "id": "1", "amount": "1000.55" }
/// ```
#[derive(Debug, Deserialize)]
pub struct TopUpRequest {
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub amount: Option<Value>,
}

/// Response of `GET /balance-info`.
///
/// ```json
/// { "user id": 1, "balance": 830.55 }
/// ```
#[derive(Debug, Serialize)]
pub struct BalanceInfoResponse {
    #[serde(rename = "user id")]
    pub user_id: i64,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
}

impl From<AccountBalance> for BalanceInfoResponse {
    fn from(account: AccountBalance) -> Self {
        Self {
            user_id: account.account_id.get(),
            balance: account.balance.value(),
        }
    }
}

/// Response of `POST /up-balance`. Echoes the credited amount.
///
/// ```json
/// { "user id": 1, "top up an amount": 1000.55 }
/// ```
#[derive(Debug, Serialize)]
pub struct TopUpResponse {
    #[serde(rename = "user id")]
    pub user_id: i64,

    #[serde(rename = "top up an amount", with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}
