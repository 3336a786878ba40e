//! Server application models and type definitions.
//!
//! This module contains the application state shared by handlers, database model type aliases
//! and the session data wrappers stored through tower-sessions.

pub mod app;
pub mod db;
pub mod session;
