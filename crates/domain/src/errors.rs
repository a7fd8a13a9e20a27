//! Error types used throughout the client
//!
//! Every call ends in exactly one of three outcomes:
//! - `Ok(T)`: the platform answered with `errcode == 0`
//! - [`ApiError::Platform`]: the platform answered with a non-zero `errcode`
//!   (a business failure, returned as data)
//! - any other [`ApiError`] variant: the exchange itself failed (transport)

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A non-zero `errcode` reported by the platform.
///
/// `message` is informational only; callers branch on `code`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("errcode {code}: {message}")]
pub struct PlatformError {
    /// Platform status code (`errcode`)
    pub code: i64,
    /// Platform status message (`errmsg`)
    pub message: String,
}

impl PlatformError {
    /// Build a platform error from the envelope fields
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Non-zero `errcode` from the platform
    Business,
    /// Network, timeout or wire-format failures
    Transport,
    /// Invalid client configuration or request arguments
    Config,
}

/// API operation errors
///
/// `Clone` so that a single credential refresh outcome can be handed to
/// every caller waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Platform(_) => ApiErrorCategory::Business,
            Self::Network(_) | Self::Timeout(_) | Self::Decode(_) | Self::Encode(_) => {
                ApiErrorCategory::Transport
            }
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Platform status code, if the platform rejected the call
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Platform(err) => Some(err.code),
            _ => None,
        }
    }

    /// `true` for business failures reported through `errcode`
    pub const fn is_platform(&self) -> bool {
        matches!(self, Self::Platform(_))
    }

    /// `true` for failures of the exchange itself
    pub const fn is_transport(&self) -> bool {
        matches!(self.category(), ApiErrorCategory::Transport)
    }

    /// `true` if the platform code is in `codes`
    pub fn is_platform_code_in(&self, codes: &[i64]) -> bool {
        self.code().is_some_and(|code| codes.contains(&code))
    }
}

/// Result type alias for client operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;
