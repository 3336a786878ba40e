//! Outbound mail delivery.
//!
//! Services hand fully built [`Email`]s to a [`Mailer`]. Production uses [`LogMailer`] until a
//! real transport is plugged in; tests use [`MemoryMailer`], which keeps an inspectable outbox.

use std::sync::Mutex;

use crate::server::error::{mail::MailError, Error};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail delivery abstraction used by the services.
pub trait Mailer: Send + Sync {
    /// Deliver a message or return an error when the transport rejects it.
    fn deliver(&self, email: &Email) -> Result<(), Error>;
}

/// Sender that logs messages instead of delivering them.
#[derive(Clone, Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn deliver(&self, email: &Email) -> Result<(), Error> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Email delivery stub"
        );

        Ok(())
    }
}

/// Sender that records every delivered message in memory.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    deliveries: Mutex<Vec<Email>>,
    reject_all: bool,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mailer whose transport rejects every message
    pub fn rejecting() -> Self {
        Self {
            reject_all: true,
            ..Self::default()
        }
    }

    /// Messages delivered so far, oldest first
    pub fn deliveries(&self) -> Result<Vec<Email>, Error> {
        let deliveries = self
            .deliveries
            .lock()
            .map_err(|_| MailError::OutboxPoisoned)?;

        Ok(deliveries.clone())
    }

    pub fn clear(&self) -> Result<(), Error> {
        self.deliveries
            .lock()
            .map_err(|_| MailError::OutboxPoisoned)?
            .clear();

        Ok(())
    }
}

impl Mailer for MemoryMailer {
    fn deliver(&self, email: &Email) -> Result<(), Error> {
        if self.reject_all {
            return Err(MailError::DeliveryFailed {
                to: email.to.clone(),
                reason: "transport rejected the message".to_string(),
            }
            .into());
        }

        self.deliveries
            .lock()
            .map_err(|_| MailError::OutboxPoisoned)?
            .push(email.clone());

        Ok(())
    }
}
