//! HTTP router and shared handler state.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::{context::RequestContext, handlers, services::BalanceService};

/// State shared with every handler via `State` extraction.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BalanceService>,

    /// Deadline applied to each request's storage work
    pub request_timeout: Duration,

    /// Cancelled on shutdown; every request context is a child of it
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(service: Arc<BalanceService>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    /// Fresh context for one request.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::child_of(&self.shutdown).with_timeout(self.request_timeout)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/balance-info", get(handlers::balance::balance_info))
        .route("/up-balance", post(handlers::balance::up_balance))
        // Request/response tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
