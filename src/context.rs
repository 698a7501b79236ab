//! Per-call cancellation and deadline.
//!
//! Every balance operation receives a [`RequestContext`]. Waiting for the
//! account lock and every storage call run through [`RequestContext::run`],
//! which drops the inner future as soon as the token is cancelled or the
//! deadline passes. Dropping the future aborts the storage call and releases
//! any guard it owned.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::BalanceError;

/// Cancellation token plus an optional deadline.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context cancelled together with `parent` (e.g. on server shutdown).
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
            deadline: None,
        }
    }

    /// Set the deadline to `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel this context and all of its clones.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Drive `fut` until it completes, the token is cancelled, or the
    /// deadline passes, whichever comes first.
    ///
    /// # Errors
    ///
    /// `Cancelled` if the context finished first. `fut` is dropped before
    /// this returns.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, BalanceError>
    where
        F: Future,
    {
        if self.is_done() {
            return Err(BalanceError::Cancelled);
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(BalanceError::Cancelled),
            _ = expired => Err(BalanceError::Cancelled),
            output = fut => Ok(output),
        }
    }
}
