//! Per-account exclusive sections.
//!
//! Top-ups to the same account must not interleave their read-modify-write,
//! while top-ups to different accounts should not wait on each other. Each
//! account gets its own async mutex, created on first use and dropped from
//! the table once nobody holds or waits for it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::AccountId;

#[derive(Debug, Default)]
pub struct AccountLocks {
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `account_id`.
    ///
    /// The section is released when the returned guard is dropped. Dropping
    /// the returned future before it completes gives up the wait and reclaims
    /// the table entry if nobody else uses it.
    pub fn acquire(&self, account_id: AccountId) -> Acquire<'_> {
        // Clone the Arc out so the shard lock is not held across the wait
        let lock = self.locks.entry(account_id).or_default().clone();

        Acquire {
            locks: self,
            account_id,
            wait: Some(Box::pin(lock.lock_owned())),
        }
    }

    /// Number of accounts with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn release(&self, account_id: AccountId) {
        // Only the table's own reference left: nobody holds or waits
        self.locks
            .remove_if(&account_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

type LockWait = Pin<Box<dyn Future<Output = OwnedMutexGuard<()>> + Send>>;

/// Future returned by [`AccountLocks::acquire`].
///
/// The pending wait owns this caller's only reference to the account's
/// mutex, so dropping it before `release` leaves an exact reference count.
pub struct Acquire<'a> {
    locks: &'a AccountLocks,
    account_id: AccountId,
    wait: Option<LockWait>,
}

impl<'a> Future for Acquire<'a> {
    type Output = AccountGuard<'a>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let Some(wait) = this.wait.as_mut() else {
            panic!("`Acquire` polled after completion");
        };

        match wait.as_mut().poll(cx) {
            Poll::Ready(held) => {
                this.wait = None;
                Poll::Ready(AccountGuard {
                    locks: this.locks,
                    account_id: this.account_id,
                    held: Some(held),
                })
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for Acquire<'_> {
    fn drop(&mut self) {
        if let Some(wait) = self.wait.take() {
            // Gave up waiting: drop our reference before checking the count
            drop(wait);
            self.locks.release(self.account_id);
        }
    }
}

/// Exclusive access to one account. Released on drop.
#[derive(Debug)]
pub struct AccountGuard<'a> {
    locks: &'a AccountLocks,
    account_id: AccountId,
    held: Option<OwnedMutexGuard<()>>,
}

impl AccountGuard<'_> {
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }
}

impl Drop for AccountGuard<'_> {
    fn drop(&mut self) {
        // Unlock first so the guard's Arc no longer counts
        drop(self.held.take());
        self.locks.release(self.account_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn id(n: i64) -> AccountId {
        AccountId::new(n).unwrap()
    }

    #[tokio::test]
    async fn entry_is_reclaimed_after_release() {
        let locks = AccountLocks::new();
        {
            let guard = locks.acquire(id(1)).await;
            assert_eq!(guard.account_id(), id(1));
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn different_accounts_do_not_block() {
        let locks = AccountLocks::new();
        let _first = locks.acquire(id(1)).await;
        let second = tokio::time::timeout(Duration::from_secs(1), locks.acquire(id(2))).await;
        assert!(second.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn same_account_waits_for_release() {
        let locks = Arc::new(AccountLocks::new());
        let first = locks.acquire(id(1)).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(id(1)).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!waiter.is_finished());

        drop(first);
        waiter.await.unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_waiter_reclaims_entry() {
        let locks = AccountLocks::new();
        let first = locks.acquire(id(5)).await;

        let mut waiter = locks.acquire(id(5));
        let waited = tokio::time::timeout(Duration::from_millis(10), &mut waiter).await;
        assert!(waited.is_err());

        // Holder leaves while the waiter is still queued
        drop(first);
        assert_eq!(locks.len(), 1);

        drop(waiter);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn cancelled_waiter_keeps_entry_for_holder() {
        let locks = AccountLocks::new();
        let first = locks.acquire(id(6)).await;

        let waiter = locks.acquire(id(6));
        drop(waiter);
        assert_eq!(locks.len(), 1);

        drop(first);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn entry_survives_while_someone_waits() {
        let locks = Arc::new(AccountLocks::new());
        let first = locks.acquire(id(3)).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let guard = locks.acquire(id(3)).await;
                tokio::task::yield_now().await;
                drop(guard);
            })
        };
        tokio::task::yield_now().await;

        drop(first);
        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
