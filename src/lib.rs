//! Turnstile session authentication service.
//!
//! `model` holds the DTOs shared with API consumers, `server` holds the HTTP controllers,
//! services, persistence and startup code.

pub mod model;
pub mod server;
