//! Database fixtures inserted during test execution.

pub mod user;
