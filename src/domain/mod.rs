//! Domain types for account balances.
//!
//! This module contains the value types that flow through the balance
//! service and the pure validation rules that build them from untrusted
//! input. Nothing here performs I/O.

/// Account identifiers, monetary amounts and balances
pub mod account;
/// Core error taxonomy
pub mod error;
/// Parsing and validation of raw request values
pub mod validation;

pub use account::{AccountBalance, AccountId, MAX_BALANCE, MonetaryAmount};
pub use error::{AmountError, BalanceError};
pub use validation::{validate_account_id, validate_query_account_id, validate_top_up_amount};
