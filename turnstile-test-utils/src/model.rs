//! Database model type aliases matching those in the main turnstile crate.

/// Type alias for the Turnstile user database model.
pub type UserModel = entity::turnstile_user::Model;
