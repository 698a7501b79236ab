//! Request and response bodies of the HTTP API.

/// Balance lookup and top-up bodies
pub mod balance;
