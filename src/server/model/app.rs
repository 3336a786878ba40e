use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::{
        Config, DEFAULT_AFTER_SIGN_IN_URL, DEFAULT_AFTER_SIGN_OUT_URL, DEFAULT_APP_URL,
        DEFAULT_MAIL_FROM,
    },
    mailer::Mailer,
    service::auth::remember::{DefaultRememberExpiry, FixedRememberExpiry, RememberTokenExpiry},
};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: Arc<dyn Mailer>,
    pub settings: Arc<SessionSettings>,
}

impl AppState {
    /// Creates application state with default session settings
    pub fn new(db: DatabaseConnection, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            mailer,
            settings: Arc::new(SessionSettings::default()),
        }
    }

    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    /// Replaces the strategy deciding when remember cookies expire
    pub fn with_remember_expiry(mut self, expiry: impl RememberTokenExpiry + 'static) -> Self {
        let mut settings = (*self.settings).clone();
        settings.remember_expiry = Arc::new(expiry);
        self.settings = Arc::new(settings);
        self
    }
}

/// Settings governing the session lifecycle.
#[derive(Clone)]
pub struct SessionSettings {
    /// Sender address of outgoing mail
    pub mail_from: String,
    /// Public base URL used to build links in outgoing mail
    pub app_url: String,
    /// Redirect target after signing in when no return URL is given
    pub after_sign_in_url: String,
    /// Redirect target after signing out when no return URL is given
    pub after_sign_out_url: String,
    /// Decides the expiration of issued remember cookies
    pub remember_expiry: Arc<dyn RememberTokenExpiry>,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        let remember_expiry: Arc<dyn RememberTokenExpiry> = match config.remember_token_days {
            Some(days) => Arc::new(FixedRememberExpiry::days(days)),
            None => Arc::new(DefaultRememberExpiry),
        };

        Self {
            mail_from: config.mail_from.clone(),
            app_url: config.app_url.clone(),
            after_sign_in_url: config.after_sign_in_url.clone(),
            after_sign_out_url: config.after_sign_out_url.clone(),
            remember_expiry,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            mail_from: DEFAULT_MAIL_FROM.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            after_sign_in_url: DEFAULT_AFTER_SIGN_IN_URL.to_string(),
            after_sign_out_url: DEFAULT_AFTER_SIGN_OUT_URL.to_string(),
            remember_expiry: Arc::new(DefaultRememberExpiry),
        }
    }
}
