//! Date and time parsing helpers shared by the booking and reminder flows.
//!
//! Request values that fail to parse become `400 Bad Request`; stored values that fail
//! to parse indicate corrupted data and become internal errors.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::server::error::{internal::InternalError, AppError};

const TIME_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an `HH:MM` time supplied by a client.
///
/// # Returns
/// - `Ok(NaiveTime)` - Parsed time
/// - `Err(AppError::BadRequest)` - Value is not a valid `HH:MM` time
pub fn parse_request_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("Invalid time '{}', expected HH:MM", value)))
}

/// Parses a `YYYY-MM-DD` date supplied by a client.
///
/// # Returns
/// - `Ok(NaiveDate)` - Parsed date
/// - `Err(AppError::BadRequest)` - Value is not a valid date
pub fn parse_request_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", value))
    })
}

/// Combines a client-supplied date and time into a UTC timestamp.
pub fn parse_request_datetime(date: &str, time: &str) -> Result<DateTime<Utc>, AppError> {
    let date = parse_request_date(date)?;
    let time = parse_request_time(time)?;

    Ok(Utc.from_utc_datetime(&date.and_time(time)))
}

/// Parses an `HH:MM` time read back from the database.
///
/// # Returns
/// - `Ok(NaiveTime)` - Parsed time
/// - `Err(AppError::InternalErr(ParseStoredTime))` - Stored value is malformed
pub fn parse_stored_time(value: &str) -> Result<NaiveTime, AppError> {
    let time = NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| {
        InternalError::ParseStoredTime {
            value: value.to_string(),
            source: e,
        }
    })?;

    Ok(time)
}

/// Formats a time as `HH:MM` for storage and API responses.
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
