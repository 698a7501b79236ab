//! Error types returned by the balance core.

/// Why a monetary amount was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// A top-up amount was zero or negative.
    #[error("The amount is negative")]
    NotPositive,

    /// A balance was negative.
    #[error("The balance is negative")]
    NotNegative,

    /// The value is not a decimal number, or carries more than two
    /// fractional digits.
    #[error("Incorrect value amount")]
    Malformed,

    /// Adding the amount to the current balance overflows.
    #[error("The amount is too large")]
    TooLarge,
}

/// Failure of a balance operation.
///
/// Callers see exactly one of these per failed call. Storage details are
/// logged where they happen and never carried in this type, so the message
/// of every variant is safe to hand to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    /// The account identifier is not a positive integer.
    #[error("incorrect value id user")]
    InvalidAccountId,

    /// The amount failed validation.
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// The store has no account with this identifier.
    #[error("User not found")]
    AccountNotFound,

    /// The store failed for any other reason.
    #[error("internal error")]
    StoreUnavailable,

    /// The caller cancelled or the deadline elapsed before completion.
    #[error("request cancelled")]
    Cancelled,
}
