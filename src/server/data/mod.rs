//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations. Turnstile only owns the
//! user table; the records are created elsewhere and mutated here.

pub mod user;
