//! Validation of raw request values.
//!
//! These functions are pure: the same input always yields the same outcome
//! and nothing is read from or written to storage. Input is trimmed before
//! parsing.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::account::{AccountId, MonetaryAmount};
use super::error::{AmountError, BalanceError};

/// Parse the account identifier of a top-up request.
///
/// # Errors
///
/// `InvalidAccountId` if the value is not an integer or is `<= 0`.
pub fn validate_account_id(raw: &str) -> Result<AccountId, BalanceError> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| BalanceError::InvalidAccountId)?;
    AccountId::new(id)
}

/// Parse the account identifier of a balance lookup.
///
/// Same rule as [`validate_account_id`]; kept separate so the read path
/// can diverge without touching top-ups.
pub fn validate_query_account_id(raw: &str) -> Result<AccountId, BalanceError> {
    validate_account_id(raw)
}

/// Parse a top-up amount.
///
/// # Errors
///
/// - `InvalidAmount(Malformed)` if the value is not a decimal number or
///   has more than two fractional digits
/// - `InvalidAmount(NotPositive)` if the value is `<= 0`
/// - `InvalidAmount(TooLarge)` if the value exceeds the largest storable balance
pub fn validate_top_up_amount(raw: &str) -> Result<MonetaryAmount, BalanceError> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| AmountError::Malformed)?;
    Ok(MonetaryAmount::top_up(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_accepts_positive_integers() {
        assert_eq!(validate_account_id("1").map(AccountId::get), Ok(1));
        assert_eq!(validate_account_id(" 42 ").map(AccountId::get), Ok(42));
        assert_eq!(
            validate_query_account_id("99999999").map(AccountId::get),
            Ok(99999999)
        );
    }

    #[test]
    fn account_id_rejects_non_positive_and_garbage() {
        for raw in ["0", "-1", "", "abc", "1.5", "1e3", "99999999999999999999"] {
            assert_eq!(
                validate_account_id(raw),
                Err(BalanceError::InvalidAccountId),
                "{raw:?}"
            );
            assert_eq!(
                validate_query_account_id(raw),
                Err(BalanceError::InvalidAccountId),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn amount_accepts_positive_decimals() {
        let amount = validate_top_up_amount("1000.55").unwrap();
        assert_eq!(amount.value(), Decimal::new(100055, 2));
        assert!(validate_top_up_amount("0.01").is_ok());
        assert!(validate_top_up_amount("7").is_ok());
    }

    #[test]
    fn amount_rejects_non_positive() {
        for raw in ["0", "0.00", "-10590.55", "-0.01"] {
            assert_eq!(
                validate_top_up_amount(raw),
                Err(BalanceError::InvalidAmount(AmountError::NotPositive)),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn amount_rejects_values_the_store_cannot_hold() {
        assert!(validate_top_up_amount("999999999999999999.99").is_ok());
        for raw in ["1000000000000000000", "10000000000000000000000000"] {
            assert_eq!(
                validate_top_up_amount(raw),
                Err(BalanceError::InvalidAmount(AmountError::TooLarge)),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn amount_rejects_malformed() {
        for raw in ["", "ten", "1,50", "NaN", "0.001"] {
            assert_eq!(
                validate_top_up_amount(raw),
                Err(BalanceError::InvalidAmount(AmountError::Malformed)),
                "{raw:?}"
            );
        }
    }
}
