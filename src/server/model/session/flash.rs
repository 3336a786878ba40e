use tower_sessions::Session;

use crate::{model::session::FlashDto, server::error::Error};

pub const SESSION_FLASH_KEY: &str = "turnstile:session:flash";

/// Session wrapper for the outgoing flash message.
///
/// Only one flash is kept at a time; setting a new one replaces whatever was pending.
pub struct SessionFlash;

impl SessionFlash {
    /// Sets the flash shown on the next page
    pub async fn insert(session: &Session, flash: FlashDto) -> Result<(), Error> {
        session.insert(SESSION_FLASH_KEY, flash).await?;

        Ok(())
    }

    /// Reads the pending flash without consuming it
    pub async fn get(session: &Session) -> Result<Option<FlashDto>, Error> {
        Ok(session.get::<FlashDto>(SESSION_FLASH_KEY).await?)
    }

    /// Consumes the pending flash
    pub async fn take(session: &Session) -> Result<Option<FlashDto>, Error> {
        Ok(session.remove::<FlashDto>(SESSION_FLASH_KEY).await?)
    }
}
