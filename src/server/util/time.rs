//! Time and date calculation utilities.
//!
//! Expiration instants are computed with `chrono` throughout the services, while cookies carry
//! `time::OffsetDateTime` values. These helpers bridge the two.

use chrono::{DateTime, Duration, Months, Utc};

use crate::server::error::Error;

/// Returns the instant one calendar year after `now`.
///
/// Falls back to 365 days for the rare dates chrono cannot shift by twelve months.
pub fn one_year_from(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_add_months(Months::new(12))
        .unwrap_or_else(|| now + Duration::days(365))
}

/// Converts a chrono UTC instant into the `time` representation used by cookies.
///
/// # Returns
/// - `Ok(OffsetDateTime)` - Same instant with whole-second precision
/// - `Err(Error::ParseError)` - Instant is outside the range `time` can represent
pub fn to_offset_date_time(instant: DateTime<Utc>) -> Result<::time::OffsetDateTime, Error> {
    ::time::OffsetDateTime::from_unix_timestamp(instant.timestamp()).map_err(|e| {
        Error::ParseError(format!(
            "Failed to convert {} into a cookie expiration: {}",
            instant, e
        ))
    })
}
