use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tower_sessions::Session;

use crate::{
    model::session::FlashDto,
    server::{
        controller::{session::SIGN_IN_PATH, util::current_user::current_user},
        error::Error,
        model::{
            app::AppState,
            db::UserModel,
            session::{flash::SessionFlash, return_to::SessionReturnTo},
        },
    },
};

pub static SIGN_IN_REQUIRED_FLASH: &str = "Please sign in to continue.";

/// The signed in user, added to request extensions by [`require_user`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserModel);

/// Middleware guarding routes that need a signed in user.
///
/// Signed in or remembered users pass through with [`CurrentUser`] in the request extensions.
/// Anonymous requests are redirected to the sign-in form; for `GET` requests the requested
/// path is stored so that signing in returns there.
///
/// ```rust,ignore
/// let protected = OpenApiRouter::new()
///     .routes(routes!(controller::user::get_user))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_user));
/// ```
pub async fn require_user(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    if let Some(user) = current_user(&state, &session, &jar).await? {
        request.extensions_mut().insert(CurrentUser(user));

        return Ok(next.run(request).await);
    }

    if request.method() == Method::GET {
        if let Some(path) = request.uri().path_and_query() {
            SessionReturnTo::insert(&session, path.as_str()).await?;
        }
    }

    SessionFlash::insert(&session, FlashDto::notice(SIGN_IN_REQUIRED_FLASH)).await?;

    tracing::debug!(path = %request.uri().path(), "Redirecting anonymous request to sign in");

    Ok(Redirect::to(SIGN_IN_PATH).into_response())
}
