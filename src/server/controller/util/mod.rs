//! Helpers shared by the controllers.
//!
//! Current user lookup from the session or remember cookie, the sign-in step shared by the
//! session and confirmation controllers, and the middleware guarding routes that require a
//! signed in user.

pub mod current_user;
pub mod require_user;
