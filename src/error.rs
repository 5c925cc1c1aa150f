//! Error types for Quakeflow.
//!
//! All errors in Quakeflow are represented by the `QuakeflowError` enum.
//! Only `FetchFailed` and `NoData` are meant to reach the user; every other
//! variant is absorbed by a fallback somewhere in the pipeline.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Quakeflow operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum QuakeflowError {
    /// Network error or non-success status from a feed endpoint.
    #[error("failed to fetch feed: {0}")]
    FetchFailed(String),

    /// The feed answered but carried no features.
    #[error("feed contains no events")]
    NoData,

    /// A single feature could not be normalized.
    #[error("record rejected: {0}")]
    RecordRejected(String),

    /// No name table is registered for the locale.
    #[error("no localization registered for locale '{0}'")]
    LocalizationMissing(String),

    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl QuakeflowError {
    /// Whether the presentation layer should show this error as a message.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, QuakeflowError::FetchFailed(_) | QuakeflowError::NoData)
    }
}

impl From<QuakeflowError> for String {
    fn from(val: QuakeflowError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for QuakeflowError {
    fn from(error: std::io::Error) -> Self {
        QuakeflowError::IoError(error.to_string())
    }
}

impl From<QuakeflowError> for std::io::Error {
    fn from(val: QuakeflowError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for QuakeflowError {
    fn from(error: serde_json::Error) -> Self {
        QuakeflowError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for QuakeflowError {
    fn from(error: toml::de::Error) -> Self {
        QuakeflowError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_feed_errors_are_user_visible() {
        assert!(QuakeflowError::FetchFailed("500 Internal Server Error".into()).is_user_visible());
        assert!(QuakeflowError::NoData.is_user_visible());
        assert!(!QuakeflowError::RecordRejected("missing mag".into()).is_user_visible());
        assert!(!QuakeflowError::LocalizationMissing("de".into()).is_user_visible());
        assert!(!QuakeflowError::Config("bad".into()).is_user_visible());
    }

    #[test]
    fn test_fetch_failed_message_carries_status() {
        let err = QuakeflowError::FetchFailed("500 Internal Server Error".into());
        assert_eq!(err.to_string(), "failed to fetch feed: 500 Internal Server Error");
    }
}
