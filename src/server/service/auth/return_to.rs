//! Redirect target resolution for session actions.
//!
//! Sign-in and sign-out both redirect to a URL chosen from, in order: the `return_to` given
//! with the request, the URL stored in the session by a guarded route, and the configured
//! default. Only local paths are honoured; any other value is skipped.

use tower_sessions::Session;

use crate::server::{error::Error, model::session::return_to::SessionReturnTo};

/// Whether a URL is a path on this application.
///
/// Rejects absolute URLs, protocol-relative URLs (`//host`) and backslashes, which some
/// browsers normalize into `/`. Control characters and whitespace are rejected as well:
/// browsers strip tabs and newlines while parsing, so `/\t/host` turns into `//host`.
pub fn is_local_path(url: &str) -> bool {
    url.starts_with('/')
        && !url.starts_with("//")
        && !url
            .chars()
            .any(|c| c == '\\' || c.is_control() || c.is_whitespace())
}

/// Picks the redirect target: request value, then stored value, then `default`.
pub fn resolve_return_to(
    requested: Option<String>,
    stored: Option<String>,
    default: &str,
) -> String {
    requested
        .into_iter()
        .chain(stored)
        .find(|url| is_local_path(url))
        .unwrap_or_else(|| default.to_string())
}

pub struct ReturnTo;

impl ReturnTo {
    /// Resolves the redirect target for a session action, consuming the stored return URL.
    ///
    /// The stored URL is removed even when the request value wins so that it cannot leak into
    /// a later, unrelated redirect.
    ///
    /// # Arguments
    /// - `session` - User's session
    /// - `requested` - `return_to` supplied with the request, if any
    /// - `default` - Fallback target
    ///
    /// # Returns
    /// - `Ok(String)` - Local path to redirect to
    /// - `Err(Error::SessionError)` - Session operation failed
    pub async fn resolve(
        session: &Session,
        requested: Option<String>,
        default: &str,
    ) -> Result<String, Error> {
        let stored = SessionReturnTo::remove(session).await?;

        Ok(resolve_return_to(requested, stored, default))
    }
}
