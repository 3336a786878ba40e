//! Stored return URL session data model.
//!
//! When an anonymous user requests a protected page, the requested path is stored in the
//! session so that signing in can send them back to it. The value is one-shot: it is removed
//! as soon as a session action resolves its redirect target.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

/// Session key for storing the return URL.
pub const SESSION_RETURN_TO_KEY: &str = "turnstile:session:return_to";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionReturnTo(pub String);

impl SessionReturnTo {
    /// Stores the URL to return to after the next session action.
    ///
    /// # Arguments
    /// - `session` - User's session
    /// - `url` - Local path to return to
    ///
    /// # Returns
    /// - `Ok(())` - URL stored in session
    /// - `Err(Error)` - Session storage failed
    pub async fn insert(session: &Session, url: &str) -> Result<(), Error> {
        session
            .insert(SESSION_RETURN_TO_KEY, SessionReturnTo(url.to_string()))
            .await?;

        Ok(())
    }

    /// Retrieves the stored URL without removing it.
    pub async fn get(session: &Session) -> Result<Option<String>, Error> {
        let url = session
            .get::<SessionReturnTo>(SESSION_RETURN_TO_KEY)
            .await?
            .map(|SessionReturnTo(url)| url);

        Ok(url)
    }

    /// Removes and returns the stored URL.
    ///
    /// # Returns
    /// - `Ok(Some(String))` - A URL was stored and has been consumed
    /// - `Ok(None)` - No URL stored
    /// - `Err(Error)` - Session operation failed
    pub async fn remove(session: &Session) -> Result<Option<String>, Error> {
        let url = session
            .remove::<SessionReturnTo>(SESSION_RETURN_TO_KEY)
            .await?
            .map(|SessionReturnTo(url)| url);

        Ok(url)
    }
}
