//! Environment-driven server configuration.
//!
//! All settings are read once at startup by [`Config::from_env`]. Required variables produce
//! [`ConfigError::MissingEnvVar`] when absent, malformed values produce
//! [`ConfigError::InvalidEnvValue`] and redirect defaults pointing off-site produce
//! [`ConfigError::NonLocalRedirect`].

use std::net::SocketAddr;

use crate::server::{error::config::ConfigError, service::auth::return_to::is_local_path};

pub static DEFAULT_MAIL_FROM: &str = "donotreply@example.com";
pub static DEFAULT_APP_URL: &str = "http://localhost:8080";
pub static DEFAULT_AFTER_SIGN_IN_URL: &str = "/";
pub static DEFAULT_AFTER_SIGN_OUT_URL: &str = "/api/session/new";
pub static DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
/// Upper bound for `REMEMBER_TOKEN_DAYS`, roughly one hundred years
pub const MAX_REMEMBER_TOKEN_DAYS: u32 = 36_500;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub mail_from: String,
    pub app_url: String,
    pub after_sign_in_url: String,
    pub after_sign_out_url: String,
    /// Overrides the default one year remember cookie lifetime when set
    pub remember_token_days: Option<u32>,
    pub server_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let remember_token_days = match optional_var("REMEMBER_TOKEN_DAYS") {
            Some(days) => Some(parse_remember_token_days(&days)?),
            None => None,
        };

        let server_addr = optional_var("SERVER_ADDR")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr = server_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: "SERVER_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            valkey_url: required_var("VALKEY_URL")?,
            mail_from: optional_var("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            app_url: optional_var("APP_URL")
                .unwrap_or_else(|| DEFAULT_APP_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            after_sign_in_url: redirect_var("AFTER_SIGN_IN_URL", DEFAULT_AFTER_SIGN_IN_URL)?,
            after_sign_out_url: redirect_var("AFTER_SIGN_OUT_URL", DEFAULT_AFTER_SIGN_OUT_URL)?,
            remember_token_days,
            server_addr,
        })
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional_var(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn redirect_var(var: &str, default: &str) -> Result<String, ConfigError> {
    match optional_var(var) {
        Some(value) => parse_redirect_url(var, value),
        None => Ok(default.to_string()),
    }
}

fn parse_redirect_url(var: &str, value: String) -> Result<String, ConfigError> {
    let value = value.trim().to_string();
    if !is_local_path(&value) {
        return Err(ConfigError::NonLocalRedirect {
            var: var.to_string(),
            value,
        });
    }

    Ok(value)
}

fn parse_remember_token_days(value: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvValue {
        var: "REMEMBER_TOKEN_DAYS".to_string(),
        reason,
    };

    let days = value.trim().parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    if days == 0 {
        return Err(invalid("must be greater than zero".to_string()));
    }
    if days > MAX_REMEMBER_TOKEN_DAYS {
        return Err(invalid(format!(
            "must be at most {} days",
            MAX_REMEMBER_TOKEN_DAYS
        )));
    }

    Ok(days)
}
