//! Process-local account store.
//!
//! Keeps balances in a `DashMap` and counts every read and write. Faults and
//! latency can be injected to exercise the service's error and cancellation
//! paths without a database.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use super::{AccountStore, StoreError};
use crate::context::RequestContext;
use crate::domain::{AccountId, MonetaryAmount};

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    balances: DashMap<AccountId, MonetaryAmount>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_fetch: AtomicBool,
    fail_persist: AtomicBool,
    latency_ms: AtomicU64,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding.
    pub fn with_account(self, account_id: AccountId, balance: MonetaryAmount) -> Self {
        self.insert(account_id, balance);
        self
    }

    pub fn insert(&self, account_id: AccountId, balance: MonetaryAmount) {
        self.balances.insert(account_id, balance);
    }

    /// Balance as stored, bypassing counters and faults.
    pub fn balance_of(&self, account_id: AccountId) -> Option<MonetaryAmount> {
        self.balances.get(&account_id).map(|b| *b)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent `fetch` fail with `Unavailable`.
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `persist` fail with `Unavailable`.
    pub fn fail_persists(&self, fail: bool) {
        self.fail_persist.store(fail, Ordering::SeqCst);
    }

    /// Delay applied to every storage call.
    pub fn set_latency(&self, latency: Duration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(millis, Ordering::SeqCst);
    }

    async fn simulate_io(&self) {
        // Always yield so concurrent callers get a chance to interleave
        tokio::task::yield_now().await;
        let millis = self.latency_ms.load(Ordering::SeqCst);
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn fetch(
        &self,
        _ctx: &RequestContext,
        account_id: AccountId,
    ) -> Result<MonetaryAmount, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.simulate_io().await;

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected fetch failure".to_string()));
        }

        self.balance_of(account_id).ok_or(StoreError::NotFound)
    }

    async fn persist(
        &self,
        _ctx: &RequestContext,
        account_id: AccountId,
        balance: MonetaryAmount,
    ) -> Result<(), StoreError> {
        self.simulate_io().await;

        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "injected persist failure".to_string(),
            ));
        }

        let mut entry = self
            .balances
            .get_mut(&account_id)
            .ok_or(StoreError::NotFound)?;
        *entry = balance;
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
