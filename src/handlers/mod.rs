//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Decodes the JSON body into raw values
//! 2. Validates them into domain types
//! 3. Calls the balance service under a per-request context
//! 4. Returns a JSON response or an `AppError`

/// Balance lookup and top-up endpoints
pub mod balance;
/// Service health endpoint
pub mod health;
