//! Data transfer objects returned by the Turnstile API.

pub mod api;
pub mod session;
pub mod user;
