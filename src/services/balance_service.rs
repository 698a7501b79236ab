//! Balance service - lookups and top-ups.
//!
//! This service handles:
//! - Balance lookups
//! - Top-ups with per-account serialization
//! - Mapping storage failures to the public error taxonomy
//!
//! # Consistency
//!
//! Top-ups to one account run their read-modify-write inside that account's
//! exclusive section, so no update is lost. Lookups do not take the section:
//! the store writes atomically, so a lookup sees the last committed balance,
//! which may predate a top-up that is still in flight.
//!
//! # Cancellation
//!
//! The lock wait and every storage call run under the caller's
//! [`RequestContext`]. On cancellation the pending call is dropped, the
//! section is released, and `Cancelled` is returned.

use std::sync::Arc;

use crate::{
    context::RequestContext,
    domain::{AccountBalance, AccountId, BalanceError, MonetaryAmount},
    services::account_locks::AccountLocks,
    store::{AccountStore, StoreError},
};

/// Map a store failure to the public taxonomy, logging what gets hidden.
fn store_failure(account_id: AccountId, err: StoreError) -> BalanceError {
    match err {
        StoreError::NotFound => BalanceError::AccountNotFound,
        other => {
            tracing::warn!(%account_id, error = %other, "account store failure");
            BalanceError::StoreUnavailable
        }
    }
}

pub struct BalanceService {
    store: Arc<dyn AccountStore>,
    locks: AccountLocks,
}

impl BalanceService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            locks: AccountLocks::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Current balance of an account.
    ///
    /// Performs exactly one store read and no write.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`: the store has no such account
    /// - `StoreUnavailable`: any other storage failure
    /// - `Cancelled`: the context finished first
    pub async fn get_balance(
        &self,
        ctx: &RequestContext,
        account_id: AccountId,
    ) -> Result<AccountBalance, BalanceError> {
        let balance = ctx
            .run(self.store.fetch(ctx, account_id))
            .await?
            .map_err(|e| store_failure(account_id, e))?;

        tracing::debug!(%account_id, %balance, "balance fetched");

        Ok(AccountBalance {
            account_id,
            balance,
        })
    }

    /// Credit `amount` to an account and return the new balance.
    ///
    /// # Process
    ///
    /// 1. Acquire the account's exclusive section
    /// 2. Read the current balance
    /// 3. Add `amount` exactly
    /// 4. Persist the new balance
    /// 5. Release the section (guard drop, on every path)
    ///
    /// Exactly one read, and on success exactly one write. A failure at any
    /// step leaves the stored balance untouched.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound`: the store has no such account
    /// - `InvalidAmount(TooLarge)`: the new balance would overflow
    /// - `StoreUnavailable`: any other storage failure
    /// - `Cancelled`: the context finished first
    pub async fn top_up(
        &self,
        ctx: &RequestContext,
        account_id: AccountId,
        amount: MonetaryAmount,
    ) -> Result<AccountBalance, BalanceError> {
        let _section = ctx.run(self.locks.acquire(account_id)).await?;

        let current = ctx
            .run(self.store.fetch(ctx, account_id))
            .await?
            .map_err(|e| store_failure(account_id, e))?;

        let balance = current.checked_add(amount)?;

        ctx.run(self.store.persist(ctx, account_id, balance))
            .await?
            .map_err(|e| store_failure(account_id, e))?;

        tracing::info!(%account_id, %amount, %balance, "account topped up");

        Ok(AccountBalance {
            account_id,
            balance,
        })
    }

    /// Number of accounts currently holding a lock entry.
    pub fn active_locks(&self) -> usize {
        self.locks.len()
    }
}
