use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Failed to deliver email to {to}: {reason}")]
    DeliveryFailed { to: String, reason: String },
    #[error("Mail outbox lock was poisoned")]
    OutboxPoisoned,
}

impl IntoResponse for MailError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
