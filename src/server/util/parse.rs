//! Parsing of enum-like request values.

use std::str::FromStr;

use crate::server::error::AppError;

/// Parses a lowercase enum value supplied by a client, such as a role or status filter.
///
/// # Returns
/// - `Ok(T)` - Parsed value
/// - `Err(AppError::BadRequest)` - Value is not one of the accepted variants
pub fn parse_request_value<T: FromStr>(value: &str, kind: &str) -> Result<T, AppError> {
    value
        .trim()
        .to_lowercase()
        .parse::<T>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} '{}'", kind, value)))
}

/// Parses an optional filter, treating blank input as absent.
pub fn parse_optional_value<T: FromStr>(
    value: Option<&str>,
    kind: &str,
) -> Result<Option<T>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => parse_request_value(value, kind).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::appointment::AppointmentStatus;

    #[test]
    fn parses_case_insensitively() {
        let status: AppointmentStatus = parse_request_value(" Confirmed ", "status").unwrap();
        assert_eq!(status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn rejects_unknown_values() {
        let result: Result<AppointmentStatus, _> = parse_request_value("done", "status");
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn blank_filter_is_none() {
        let result: Option<AppointmentStatus> = parse_optional_value(Some("  "), "status").unwrap();
        assert!(result.is_none());
    }
}
