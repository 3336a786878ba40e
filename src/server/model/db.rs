//! Database model type aliases.
//!
//! Aliases for the SeaORM entity models used throughout the application, so that type
//! signatures don't import from the generated `entity` crate directly.

/// Type alias for the Turnstile user database model.
///
/// # Fields (from `entity::turnstile_user::Model`)
/// - `id` - Primary key, unique user identifier
/// - `email` - Normalized (trimmed, lowercased) unique email address
/// - `encrypted_password` - Argon2id PHC hash of the user's password
/// - `email_confirmed` - Whether the user confirmed ownership of their email address
/// - `confirmation_token` - Token embedded in the confirmation email, cleared once confirmed
/// - `remember_token` - Opaque token stored in the `remember_token` cookie
/// - `created_at` - Timestamp when the user account was created
/// - `updated_at` - Timestamp of the last user record update
pub type UserModel = entity::turnstile_user::Model;
