//! Service layer for business logic and orchestration.
//!
//! Services implement the session lifecycle rules: credential verification, remember-token
//! issuance and rotation, return URL resolution, email confirmation, and user lookups. They
//! coordinate repositories and the mailer and leave HTTP concerns to the controllers.

pub mod auth;
pub mod user;
