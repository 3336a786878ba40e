//! HTTP controller endpoints for the Turnstile web API.
//!
//! Controllers drive the session lifecycle: rendering the sign-in form, signing users in and
//! out, confirming emails and exposing the current user. They integrate with tower-sessions
//! for the session principal and flash messages, with `axum-extra` cookie jars for the
//! remember cookie, and use utoipa for OpenAPI documentation.

pub mod confirmation;
pub mod flash;
pub mod session;
pub mod user;
pub mod util;
