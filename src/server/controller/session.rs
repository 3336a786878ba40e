use std::fmt;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::{IntoParams, ToSchema};

use crate::{
    model::{
        api::ErrorDto,
        session::{FlashDto, SignInFormDto},
    },
    server::{
        controller::util::current_user::{current_user, sign_in},
        error::Error,
        model::{
            app::AppState,
            session::{flash::SessionFlash, user::SessionUserId},
        },
        service::auth::{
            confirmation::ConfirmationService,
            credentials::{CredentialService, Verification},
            remember::RememberTokenService,
            return_to::ReturnTo,
        },
    },
};

pub static SESSION_TAG: &str = "session";

/// Path of the sign-in form.
pub static SIGN_IN_PATH: &str = "/api/session/new";

pub static BAD_CREDENTIALS_FLASH: &str = "Bad email or password.";
pub static UNCONFIRMED_EMAIL_FLASH: &str =
    "User has not confirmed email. Confirmation email will be resent.";
pub static SIGNED_IN_FLASH: &str = "Signed in successfully.";
pub static SIGNED_OUT_FLASH: &str = "You have been signed out.";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReturnToParams {
    /// Local path to redirect to once the action completes
    pub return_to: Option<String>,
}

/// Credentials submitted by the sign-in form.
#[derive(Deserialize, ToSchema)]
pub struct SignInParams {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub return_to: Option<String>,
}

impl fmt::Debug for SignInParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInParams")
            .field("email", &self.email)
            .field("password", &"[FILTERED]")
            .field("return_to", &self.return_to)
            .finish()
    }
}

/// Render the sign-in form
///
/// The `return_to` query parameter is threaded into the form unchanged so that it survives into
/// the sign-in request.
#[utoipa::path(
    get,
    path = "/api/session/new",
    tag = SESSION_TAG,
    params(ReturnToParams),
    responses(
        (status = 200, description = "Sign-in form", body = SignInFormDto)
    ),
)]
pub async fn new_session(Query(params): Query<ReturnToParams>) -> impl IntoResponse {
    (StatusCode::OK, Json(SignInFormDto::new(params.return_to)))
}

/// Render the sign-in form, alias of `GET /api/session/new`
#[utoipa::path(
    get,
    path = "/api/login",
    tag = SESSION_TAG,
    params(ReturnToParams),
    responses(
        (status = 200, description = "Sign-in form", body = SignInFormDto)
    ),
)]
pub async fn login(params: Query<ReturnToParams>) -> impl IntoResponse {
    new_session(params).await
}

/// Sign in with email and password
///
/// # Responses
/// - 303 (See Other): Signed in, remember cookie issued, redirect to the return URL
/// - 401 (Unauthorized): Unknown email or wrong password, sign-in form re-rendered
/// - 403 (Forbidden): Email not confirmed, confirmation email resent and sign-in form
///   re-rendered
/// - 500 (Internal Server Error): Database, session or mail delivery failure
#[utoipa::path(
    post,
    path = "/api/session",
    tag = SESSION_TAG,
    request_body(content = SignInParams, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, redirect to the return URL"),
        (status = 401, description = "Bad email or password", body = SignInFormDto),
        (status = 403, description = "Email not confirmed", body = SignInFormDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(params): Form<SignInParams>,
) -> Result<Response, Error> {
    tracing::debug!(params = ?params, "Processing sign in");

    let SignInParams {
        email,
        password,
        return_to,
    } = params;

    match CredentialService::new(&state.db)
        .verify(&email, &password)
        .await?
    {
        Verification::InvalidCredentials => {
            SessionFlash::insert(&session, FlashDto::failure(BAD_CREDENTIALS_FLASH)).await?;

            Ok((StatusCode::UNAUTHORIZED, Json(SignInFormDto::new(return_to))).into_response())
        }
        Verification::UnconfirmedEmail(user) => {
            ConfirmationService::new(&state)
                .send_confirmation(&user)
                .await?;
            SessionFlash::insert(&session, FlashDto::failure(UNCONFIRMED_EMAIL_FLASH)).await?;

            Ok((StatusCode::FORBIDDEN, Json(SignInFormDto::new(return_to))).into_response())
        }
        Verification::Authenticated(user) => {
            let jar = sign_in(&state, &session, jar, &user).await?;
            SessionFlash::insert(&session, FlashDto::success(SIGNED_IN_FLASH)).await?;

            let url =
                ReturnTo::resolve(&session, return_to, &state.settings.after_sign_in_url).await?;

            Ok((jar, Redirect::to(&url)).into_response())
        }
    }
}

/// Sign out
///
/// Safe to call without a session or remember cookie. When a user is signed in or remembered
/// their remember token is rotated so that every issued cookie stops working.
///
/// # Responses
/// - 303 (See Other): Signed out, remember cookie removed, redirect to the return URL
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    delete,
    path = "/api/session",
    tag = SESSION_TAG,
    params(ReturnToParams),
    responses(
        (status = 303, description = "Signed out, redirect to the return URL"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn destroy_session(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(params): Query<ReturnToParams>,
) -> Result<Response, Error> {
    if let Some(user) = current_user(&state, &session, &jar).await? {
        RememberTokenService::new(&state.db, state.settings.remember_expiry.as_ref())
            .rotate(&user)
            .await?;

        tracing::info!(user_id = %user.id, "User signed out");
    }

    let jar = jar.remove(RememberTokenService::removal_cookie());
    SessionUserId::remove(&session).await?;
    SessionFlash::insert(&session, FlashDto::notice(SIGNED_OUT_FLASH)).await?;

    let url =
        ReturnTo::resolve(&session, params.return_to, &state.settings.after_sign_out_url).await?;

    Ok((jar, Redirect::to(&url)).into_response())
}

/// Sign out, alias of `DELETE /api/session` for links
#[utoipa::path(
    get,
    path = "/api/logout",
    tag = SESSION_TAG,
    params(ReturnToParams),
    responses(
        (status = 303, description = "Signed out, redirect to the return URL"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    state: State<AppState>,
    session: Session,
    jar: CookieJar,
    params: Query<ReturnToParams>,
) -> Result<Response, Error> {
    destroy_session(state, session, jar, params).await
}
