//! View models for the sign-in form and flash messages.

use serde::{Deserialize, Serialize};

/// Path the sign-in form posts its credentials to.
pub const SIGN_IN_FORM_ACTION: &str = "/api/session";

/// Sign-in form rendered by `GET /api/session/new` and re-rendered after a failed sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SignInFormDto {
    /// Where the form submits to
    pub action: String,
    /// Return URL carried as a hidden field so it survives into the sign-in POST
    pub return_to: Option<String>,
}

impl SignInFormDto {
    pub fn new(return_to: Option<String>) -> Self {
        Self {
            action: SIGN_IN_FORM_ACTION.to_string(),
            return_to,
        }
    }
}

/// Severity of a flash message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Notice,
    Failure,
}

/// A one-shot, user-facing status message that survives a single redirect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FlashDto {
    pub kind: FlashKind,
    pub message: String,
}

impl FlashDto {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Notice,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Failure,
            message: message.into(),
        }
    }
}
