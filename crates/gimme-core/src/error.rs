//! Error handling types

use std::fmt;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the resolution engine
#[derive(Error, Debug)]
pub enum Error {
    /// No provider is registered for the resolved key. This covers every
    /// unresolved lookup uniformly, including a generic request whose
    /// parameterization does not structurally match any registration.
    #[error("no provider registered for {key}")]
    NotFound {
        /// Rendered form of the key that failed to resolve
        key: String,
    },

    /// A registration carried a type key with an unspecified generic
    /// argument. Raised at registration time, never deferred to
    /// resolution.
    #[error("invalid registration: {message}")]
    InvalidRegistration {
        /// Description of the rejected registration
        message: String,
    },

    /// An instance payload did not carry the requested Rust type. Arises
    /// only when the typed and keyed registration planes are mixed
    /// incorrectly.
    #[error("instance for {key} does not carry a {expected}")]
    TypeMismatch {
        /// Rendered form of the requested key
        key: String,
        /// The Rust type the caller asked for
        expected: &'static str,
    },
}

impl Error {
    /// Create a not-found error for an unresolved key
    pub fn not_found(key: impl fmt::Display) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }

    /// Create an invalid-registration error
    pub fn invalid_registration(message: impl Into<String>) -> Self {
        Self::InvalidRegistration {
            message: message.into(),
        }
    }

    /// Create a type-mismatch error for a key
    pub fn type_mismatch(key: impl fmt::Display, expected: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected,
        }
    }
}
