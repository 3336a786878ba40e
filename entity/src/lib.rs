//! SeaORM entities for the Turnstile database schema.

pub mod prelude;

pub mod turnstile_user;
