//! Account balance service.
//!
//! Query a user's balance and credit (top up) a positive amount. The core is
//! [`services::BalanceService`]: it takes validated domain values, serializes
//! top-ups per account, and persists through the [`store::AccountStore`] port.
//! The HTTP surface (axum) and the PostgreSQL store (sqlx) are adapters
//! around it.

pub mod config;
pub mod context;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
