//! Error types for the Turnstile server application.
//!
//! This module provides the error handling system with specialized error types for each
//! domain (authentication, configuration, mail delivery). All errors implement `IntoResponse`
//! for Axum HTTP responses and use `thiserror` for their `Display` and `Error` implementations.
//!
//! Rejected sign-in attempts (bad credentials, unconfirmed email) are not errors; they are
//! expected outcomes reported to the user through flash messages and response statuses.

pub mod auth;
pub mod config;
pub mod mail;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, mail::MailError},
};

/// Main error type for the Turnstile server application.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// type so handlers can propagate them with `?`. The `IntoResponse` implementation maps each
/// error to the HTTP response API consumers see.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session user lookup, confirmation token validation).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Mail delivery error.
    #[error(transparent)]
    MailError(#[from] MailError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Password hashing or hash parsing failed.
    #[error("Failed to hash password: {0}")]
    PasswordHashError(String),
    /// Internal error indicating a bug in Turnstile's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 403 Forbidden - Invalid email confirmation link
/// - 404 Not Found - For missing users
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::MailError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the client
/// to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
