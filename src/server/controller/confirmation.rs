use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, session::FlashDto},
    server::{
        controller::{session::SIGN_IN_PATH, util::current_user::sign_in},
        error::Error,
        model::{app::AppState, session::flash::SessionFlash},
        service::auth::{
            confirmation::{ConfirmationOutcome, ConfirmationService},
            return_to::ReturnTo,
        },
    },
};

pub static CONFIRMATION_TAG: &str = "confirmation";

pub static CONFIRMED_FLASH: &str = "Confirmed email and signed in.";
pub static ALREADY_CONFIRMED_FLASH: &str = "Already confirmed email. Please sign in.";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfirmationParams {
    /// Token from the confirmation email
    #[serde(default)]
    pub token: String,
}

/// Confirm a user's email from the link in the confirmation email
///
/// # Responses
/// - 303 (See Other): Email confirmed and user signed in, or already confirmed and redirected
///   to the sign-in form
/// - 403 (Forbidden): Unknown user or the token does not match
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/confirmation",
    tag = CONFIRMATION_TAG,
    params(
        ("user_id" = i32, Path, description = "ID of the user confirming their email"),
        ConfirmationParams
    ),
    responses(
        (status = 303, description = "Confirmed and signed in, or already confirmed"),
        (status = 403, description = "Invalid confirmation link", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn confirm_email(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(user_id): Path<i32>,
    Query(params): Query<ConfirmationParams>,
) -> Result<Response, Error> {
    match ConfirmationService::new(&state)
        .confirm(user_id, &params.token)
        .await?
    {
        ConfirmationOutcome::AlreadyConfirmed => {
            SessionFlash::insert(&session, FlashDto::notice(ALREADY_CONFIRMED_FLASH)).await?;

            Ok(Redirect::to(SIGN_IN_PATH).into_response())
        }
        ConfirmationOutcome::Confirmed(user) => {
            let jar = sign_in(&state, &session, jar, &user).await?;
            SessionFlash::insert(&session, FlashDto::success(CONFIRMED_FLASH)).await?;

            let url = ReturnTo::resolve(&session, None, &state.settings.after_sign_in_url).await?;

            Ok((jar, Redirect::to(&url)).into_response())
        }
    }
}
