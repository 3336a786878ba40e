use axum::{http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, session::FlashDto},
    server::{error::Error, model::session::flash::SessionFlash},
};

pub static FLASH_TAG: &str = "flash";

/// Take the pending flash message
///
/// The message is removed from the session, a second request returns `null`.
#[utoipa::path(
    get,
    path = "/api/flash",
    tag = FLASH_TAG,
    responses(
        (status = 200, description = "Pending flash message, or null", body = Option<FlashDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn take_flash(session: Session) -> Result<impl IntoResponse, Error> {
    let flash = SessionFlash::take(&session).await?;

    Ok((StatusCode::OK, Json(flash)))
}
