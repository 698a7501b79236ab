//! Persistence port for account balances.
//!
//! The balance service only talks to storage through [`AccountStore`].
//! Adapters:
//! - [`postgres::PgAccountStore`]: the production backend (sqlx)
//! - [`memory::InMemoryAccountStore`]: process-local store used by tests

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::domain::{AccountId, MonetaryAmount};

/// In-memory adapter
pub mod memory;
/// PostgreSQL adapter
pub mod postgres;

/// Errors reported by a store.
///
/// `NotFound` is distinguishable from every other failure; the service
/// turns everything else into an opaque `StoreUnavailable`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("account not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The stored row cannot be represented as a balance (e.g. negative).
    #[error("stored balance is invalid: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read and overwrite account balances.
///
/// Implementations must be safe for concurrent independent use; the service
/// shares one instance across all requests and does its own per-account
/// serialization of top-ups.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Current balance of `account_id`.
    async fn fetch(
        &self,
        ctx: &RequestContext,
        account_id: AccountId,
    ) -> Result<MonetaryAmount, StoreError>;

    /// Overwrite the balance of `account_id`.
    ///
    /// The write must be atomic for other readers: they see either the old
    /// or the new balance.
    async fn persist(
        &self,
        ctx: &RequestContext,
        account_id: AccountId,
        balance: MonetaryAmount,
    ) -> Result<(), StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
