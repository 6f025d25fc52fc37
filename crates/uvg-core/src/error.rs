//! Centralized error types for UV Guardian.
//!
//! The hierarchy mirrors the places things can go wrong:
//! - Network errors from the remote data gateway
//! - Storage errors from the key-value store
//! - Invalid preference input
//!
//! Configuration problems are reported through `anyhow` with context and a
//! `ValidationResult`, so they have no enum here.
//!
//! Errors a user can act on expose `user_message()` for the CLI. Gateway
//! failures are only logged, since the dashboard degrades to empty data.

use thiserror::Error;

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Key-value store errors (SQLite, local state).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store could not be opened: {0}")]
    OpenFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::OpenFailed(_) => "Unable to access saved settings. Try restarting.",
            StoreError::ReadFailed(_) => "Saved settings could not be read. Using defaults.",
            StoreError::WriteFailed(_) => "Your change could not be saved.",
            StoreError::Corruption(_) => {
                "Saved settings may be corrupted. Consider deleting the store file."
            }
        }
    }
}

/// Errors raised while applying a user edit to a preference.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Invalid value {value:?} for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PreferenceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PreferenceError::InvalidValue { .. } => "That value isn't valid for this setting.",
            PreferenceError::Store(e) => e.user_message(),
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_read_error(self) -> StoreError;
    fn into_write_error(self) -> StoreError;
}

fn is_corruption(error: &rusqlite::Error) -> bool {
    matches!(error, rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt"))
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_read_error(self) -> StoreError {
        if is_corruption(&self) {
            StoreError::Corruption(self.to_string())
        } else {
            StoreError::ReadFailed(self.to_string())
        }
    }

    fn into_write_error(self) -> StoreError {
        if is_corruption(&self) {
            StoreError::Corruption(self.to_string())
        } else {
            StoreError::WriteFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_conversion() {
        let err: PreferenceError = StoreError::WriteFailed("disk full".into()).into();
        assert!(matches!(err, PreferenceError::Store(StoreError::WriteFailed(_))));
    }

    #[test]
    fn test_user_message_propagation() {
        let err = PreferenceError::Store(StoreError::WriteFailed("locked".into()));
        assert_eq!(err.user_message(), "Your change could not be saved.");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = PreferenceError::InvalidValue {
            field: "age",
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "Invalid value \"abc\" for age");
    }
}
