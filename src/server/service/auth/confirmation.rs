use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    mailer::Email,
    model::{app::AppState, db::UserModel},
    util::token::generate_token,
};

pub static CONFIRMATION_SUBJECT: &str = "Account confirmation";

/// Result of following a confirmation link.
#[derive(Debug)]
pub enum ConfirmationOutcome {
    /// The email was confirmed by this request
    Confirmed(UserModel),
    /// The email had already been confirmed, the link is stale
    AlreadyConfirmed,
}

pub struct ConfirmationService<'a> {
    state: &'a AppState,
}

impl<'a> ConfirmationService<'a> {
    /// Creates a new instance of [`ConfirmationService`]
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Sends the account confirmation email to a user.
    ///
    /// Reuses the user's pending confirmation token so that links from earlier emails keep
    /// working. A user without one gets a token generated and persisted first.
    ///
    /// # Returns
    /// - `Ok(Email)` - The delivered message
    /// - `Err(Error::MailError)` - The mailer rejected the message
    /// - `Err(Error::DbErr)` - Persisting a generated token failed
    pub async fn send_confirmation(&self, user: &UserModel) -> Result<Email, Error> {
        let token = match user.confirmation_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => token.to_string(),
            None => {
                let token = generate_token();
                UserRepository::new(&self.state.db)
                    .update_confirmation_token(user.id, &token)
                    .await?
                    .ok_or(AuthError::UserNotInDatabase(user.id))?;

                token
            }
        };

        let settings = &self.state.settings;
        let link = format!(
            "{}/api/users/{}/confirmation?token={}",
            settings.app_url, user.id, token
        );

        let email = Email {
            from: settings.mail_from.clone(),
            to: user.email.clone(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            body: format!(
                "Welcome {}!\n\nConfirm your account by following the link below:\n\n{}\n",
                user.email, link
            ),
        };

        self.state.mailer.deliver(&email)?;

        tracing::info!(user_id = %user.id, "Sent account confirmation email");

        Ok(email)
    }

    /// Confirms a user's email from the token in a confirmation link.
    ///
    /// # Arguments
    /// - `user_id` - ID from the confirmation link
    /// - `token` - Token from the confirmation link
    ///
    /// # Returns
    /// - `Ok(ConfirmationOutcome::Confirmed(user))` - Email confirmed, token cleared
    /// - `Ok(ConfirmationOutcome::AlreadyConfirmed)` - Nothing to do
    /// - `Err(Error::AuthError(AuthError::InvalidConfirmationToken))` - Unknown user or the
    ///   token does not match
    pub async fn confirm(&self, user_id: i32, token: &str) -> Result<ConfirmationOutcome, Error> {
        let user_repository = UserRepository::new(&self.state.db);

        let Some(user) = user_repository.get(user_id).await? else {
            return Err(AuthError::InvalidConfirmationToken(user_id).into());
        };

        if user.email_confirmed {
            return Ok(ConfirmationOutcome::AlreadyConfirmed);
        }

        let token_matches = !token.is_empty() && user.confirmation_token.as_deref() == Some(token);
        if !token_matches {
            return Err(AuthError::InvalidConfirmationToken(user_id).into());
        }

        let user = user_repository
            .confirm_email(user_id)
            .await?
            .ok_or(AuthError::InvalidConfirmationToken(user_id))?;

        tracing::info!(user_id = %user.id, "Confirmed user email");

        Ok(ConfirmationOutcome::Confirmed(user))
    }
}
