//! PostgreSQL account store.
//!
//! Balances live in the `users` table (see `migrations/`):
//!
//! ```sql
//! id      BIGINT PRIMARY KEY
//! balance NUMERIC(20, 2) NOT NULL DEFAULT 0 CHECK (balance >= 0)
//! ```
//!
//! `NUMERIC` maps to `rust_decimal::Decimal` through sqlx, so no value
//! passes through a float on its way in or out.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{AccountStore, StoreError};
use crate::context::RequestContext;
use crate::db::DbPool;
use crate::domain::{AccountId, MonetaryAmount};

/// Account store backed by a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn fetch(
        &self,
        _ctx: &RequestContext,
        account_id: AccountId,
    ) -> Result<MonetaryAmount, StoreError> {
        let balance: Decimal = sqlx::query_scalar("SELECT balance FROM users WHERE id = $1")
            .bind(account_id.get())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)?;

        MonetaryAmount::balance(balance)
            .map_err(|e| StoreError::Corrupt(format!("user {account_id}: {e}")))
    }

    async fn persist(
        &self,
        _ctx: &RequestContext,
        account_id: AccountId,
        balance: MonetaryAmount,
    ) -> Result<(), StoreError> {
        // Single-statement update: atomic for concurrent readers
        let updated = sqlx::query("UPDATE users SET balance = $1 WHERE id = $2")
            .bind(balance.value())
            .bind(account_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
