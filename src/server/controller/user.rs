use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        controller::util::require_user::CurrentUser,
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

/// Get the currently signed in user
///
/// # Responses
/// - 200 (Success): The signed in user
/// - 303 (See Other): Not signed in, redirect to the sign-in form
/// - 404 (Not Found): User was deleted while the request was in flight
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    get,
    path = "/api/user",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Success when retrieving user information", body = UserDto),
        (status = 303, description = "Not signed in, redirect to the sign-in form"),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(CurrentUser(current)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let Some(user) = UserService::new(&state.db).get_user(current.id).await? else {
        return Err(AuthError::UserNotInDatabase(current.id).into());
    };

    Ok((StatusCode::OK, Json(user)))
}
