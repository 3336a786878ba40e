//! Utility functions and helpers for server operations.
//!
//! This module provides password hashing, opaque token generation and the time conversions
//! needed to turn expiration instants into cookie attributes.

pub mod password;
pub mod time;
pub mod token;
