//! Error types for the homework bot

use std::fmt;

/// Which transport-level failure interrupted a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFailureKind {
    Timeout,
    TooManyRedirects,
    Connection,
}

impl fmt::Display for NetworkFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkFailureKind::Timeout => write!(f, "timed out"),
            NetworkFailureKind::TooManyRedirects => write!(f, "too many redirects"),
            NetworkFailureKind::Connection => write!(f, "connection failed"),
        }
    }
}

/// Errors that can occur in the homework bot
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network failure ({kind}): {message}")]
    Network {
        kind: NetworkFailureKind,
        message: String,
    },

    #[error("Status API unavailable: {0}")]
    ApiUnavailable(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid response shape: {0}")]
    InvalidShape(String),

    #[error("Status API returned no homeworks")]
    EmptyResult,

    #[error("Missing fields in homework record: {0}")]
    MissingFields(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Message delivery failed: {0}")]
    Delivery(String),
}

/// Coarse classification of a [`BotError`], independent of its message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingConfiguration,
    Config,
    NetworkFailure,
    ApiUnavailable,
    MalformedPayload,
    InvalidShape,
    EmptyResult,
    MissingFields,
    UnknownStatus,
    DeliveryFailure,
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::MissingConfiguration(_) => ErrorKind::MissingConfiguration,
            BotError::Config(_) => ErrorKind::Config,
            BotError::Network { .. } => ErrorKind::NetworkFailure,
            BotError::ApiUnavailable(_) => ErrorKind::ApiUnavailable,
            BotError::MalformedPayload(_) => ErrorKind::MalformedPayload,
            BotError::InvalidShape(_) => ErrorKind::InvalidShape,
            BotError::EmptyResult => ErrorKind::EmptyResult,
            BotError::MissingFields(_) => ErrorKind::MissingFields,
            BotError::UnknownStatus(_) => ErrorKind::UnknownStatus,
            BotError::Delivery(_) => ErrorKind::DeliveryFailure,
        }
    }
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, BotError>;
