//! Authentication service layer.
//!
//! This module contains the services behind signing in and out: checking credentials,
//! issuing and rotating remember tokens, resolving where to redirect afterwards, and gating
//! sign-in on email confirmation.

pub mod confirmation;
pub mod credentials;
pub mod remember;
pub mod return_to;
