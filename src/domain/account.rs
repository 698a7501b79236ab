//! Account identifier and money value types.
//!
//! Both types keep their inner value private. The only ways to build one
//! are the validating constructors below, so holding an `AccountId` or a
//! `MonetaryAmount` is proof that the value already passed the domain rules.

use std::fmt;

use rust_decimal::Decimal;

use super::error::{AmountError, BalanceError};

/// Maximum number of fractional digits a monetary amount may carry.
///
/// Balances are stored as `NUMERIC(20,2)`; accepting more digits would mean
/// rounding them away when persisting.
pub const MAX_SCALE: u32 = 2;

/// Largest balance a `NUMERIC(20,2)` column holds: 999999999999999999.99.
pub const MAX_BALANCE: Decimal = Decimal::from_parts(1_661_992_959, 1_808_227_885, 5, false, 2);

/// Identifier of a balance-holding account. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(i64);

impl AccountId {
    /// Build an identifier, rejecting zero and negative values.
    pub fn new(id: i64) -> Result<Self, BalanceError> {
        if id <= 0 {
            return Err(BalanceError::InvalidAccountId);
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = BalanceError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exact decimal currency value. Never negative.
///
/// Arithmetic goes through `rust_decimal`, so repeated top-ups accumulate
/// without binary floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    /// A zero balance.
    pub const ZERO: MonetaryAmount = MonetaryAmount(Decimal::ZERO);

    /// Build a top-up amount. Must be strictly positive.
    pub fn top_up(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive);
        }
        Self::checked_range(value)
    }

    /// Build a stored balance. Zero is allowed, negative is not.
    pub fn balance(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            return Err(AmountError::NotNegative);
        }
        Self::checked_range(value)
    }

    fn checked_range(value: Decimal) -> Result<Self, AmountError> {
        if value.normalize().scale() > MAX_SCALE {
            return Err(AmountError::Malformed);
        }
        if value > MAX_BALANCE {
            return Err(AmountError::TooLarge);
        }
        Ok(Self(value))
    }

    /// Add two amounts exactly.
    ///
    /// # Errors
    ///
    /// `TooLarge` when the sum exceeds [`MAX_BALANCE`].
    pub fn checked_add(self, other: MonetaryAmount) -> Result<Self, AmountError> {
        match self.0.checked_add(other.0) {
            Some(sum) if sum <= MAX_BALANCE => Ok(Self(sum)),
            _ => Err(AmountError::TooLarge),
        }
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a balance operation: the account and its balance after the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBalance {
    pub account_id: AccountId,
    pub balance: MonetaryAmount,
}
