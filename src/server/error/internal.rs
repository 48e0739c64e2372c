use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A string column holds a value that doesn't map to any known enum variant.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Unknown {kind} '{value}' stored in database")]
    UnknownStoredValue {
        /// Name of the enum the value was parsed into
        kind: &'static str,
        /// The stored value that failed to parse
        value: String,
    },

    /// A stored `HH:MM` time could not be parsed.
    #[error("Failed to parse stored time '{value}': {source}")]
    ParseStoredTime {
        /// The stored value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: chrono::ParseError,
    },

    /// Password hashing or hash parsing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Signing a JWT failed.
    #[error("Failed to encode access token: {0}")]
    TokenEncoding(#[source] jsonwebtoken::errors::Error),
}
