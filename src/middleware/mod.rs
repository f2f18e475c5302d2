//! HTTP middleware for the LendWise backend

pub mod security;
pub mod tracing;

pub use security::security_headers;
pub use tracing::request_tracing;
