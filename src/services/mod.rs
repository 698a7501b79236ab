//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They validate typed inputs, serialize access per account, and talk to
//! storage through the `AccountStore` port.

pub mod account_locks;
pub mod balance_service;

pub use balance_service::BalanceService;
