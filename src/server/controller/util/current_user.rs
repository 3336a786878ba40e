use axum_extra::extract::CookieJar;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::Error,
    model::{app::AppState, db::UserModel, session::user::SessionUserId},
    service::auth::remember::{RememberTokenService, REMEMBER_TOKEN_COOKIE},
};

/// Resolves the user making the request.
///
/// The session principal is checked first. A principal pointing at a user that no longer
/// exists is removed from the session. Without a principal, the `remember_token` cookie is
/// looked up and its owner, if confirmed, is signed into the session.
///
/// # Arguments
/// - `state`: Application state with the database connection and session settings
/// - `session`: The user's session
/// - `jar`: Cookies sent with the request
///
/// # Returns
/// - `Ok(Some(UserModel))`: The signed in or remembered user
/// - `Ok(None)`: Anonymous request
/// - `Err(Error)`: Database or session failure
pub async fn current_user(
    state: &AppState,
    session: &Session,
    jar: &CookieJar,
) -> Result<Option<UserModel>, Error> {
    if let Some(user_id) = SessionUserId::get(session).await? {
        if let Some(user) = UserRepository::new(&state.db).get(user_id).await? {
            return Ok(Some(user));
        }

        SessionUserId::remove(session).await?;

        tracing::debug!(
            user_id = %user_id,
            "Removed session principal for a user missing from the database"
        );
    }

    let Some(cookie) = jar.get(REMEMBER_TOKEN_COOKIE) else {
        return Ok(None);
    };

    let remember = RememberTokenService::new(&state.db, state.settings.remember_expiry.as_ref());
    let Some(user) = remember.find_user(cookie.value()).await? else {
        return Ok(None);
    };

    if !user.email_confirmed {
        return Ok(None);
    }

    SessionUserId::insert(session, user.id).await?;

    tracing::debug!(user_id = %user.id, "Restored session from remember cookie");

    Ok(Some(user))
}

/// Signs a user in: cycles the session ID, stores the principal and adds the remember cookie.
///
/// Callers must have already verified the user's credentials or confirmation token.
pub async fn sign_in(
    state: &AppState,
    session: &Session,
    jar: CookieJar,
    user: &UserModel,
) -> Result<CookieJar, Error> {
    session.cycle_id().await?;
    SessionUserId::insert(session, user.id).await?;

    let cookie = RememberTokenService::new(&state.db, state.settings.remember_expiry.as_ref())
        .issue_cookie(user)
        .await?;

    tracing::info!(user_id = %user.id, "User signed in");

    Ok(jar.add(cookie))
}
