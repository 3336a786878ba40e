//! Server application core modules.
//!
//! This module contains all server-side functionality for Turnstile: HTTP routing, the session
//! lifecycle controllers, credential and remember-token services, database access, mail
//! delivery and process startup.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod mailer;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
