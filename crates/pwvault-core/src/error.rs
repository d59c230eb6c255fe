// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the pwvault password vault.

use thiserror::Error;

use crate::types::ErrorClass;

/// The error type used by every pwvault component.
///
/// Display strings never include key material or plaintext secrets.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Missing or empty entry name, unparseable payload, unknown method.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Wrong master passphrase or a blob that fails the length check.
    ///
    /// Deliberately carries no detail about which check failed.
    #[error("invalid master password")]
    Auth,

    /// The named object does not exist in the blob store.
    #[error("internal error: object not found: {name}")]
    NotFound { name: String },

    /// A write that conflicts with the current store contents
    /// (existing, missing, or protected object).
    #[error("internal error: {0}")]
    Conflict(String),

    /// Blob-store I/O failure.
    #[error("internal error: {message}")]
    Store {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors detected at runtime.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors (cipher initialization, task failure).
    #[error("internal error: {0}")]
    Internal(String),
}

impl VaultError {
    /// Build a [`VaultError::Store`] from an underlying I/O error.
    pub fn store(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        VaultError::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The status classification this error is surfaced with.
    pub fn class(&self) -> ErrorClass {
        match self {
            VaultError::MalformedRequest(_) => ErrorClass::BadRequest,
            VaultError::Auth => ErrorClass::Forbidden,
            VaultError::NotFound { .. }
            | VaultError::Conflict(_)
            | VaultError::Store { .. }
            | VaultError::Config(_)
            | VaultError::Internal(_) => ErrorClass::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings_match_wire_format() {
        assert_eq!(
            VaultError::MalformedRequest("name cannot be empty".into()).to_string(),
            "malformed request: name cannot be empty"
        );
        assert_eq!(VaultError::Auth.to_string(), "invalid master password");
        assert_eq!(
            VaultError::Conflict("object already exists".into()).to_string(),
            "internal error: object already exists"
        );
        assert_eq!(
            VaultError::NotFound { name: "github".into() }.to_string(),
            "internal error: object not found: github"
        );
    }

    #[test]
    fn classes() {
        assert_eq!(VaultError::MalformedRequest("x".into()).class(), ErrorClass::BadRequest);
        assert_eq!(VaultError::Auth.class(), ErrorClass::Forbidden);
        assert_eq!(VaultError::Internal("x".into()).class(), ErrorClass::Internal);
        assert_eq!(
            VaultError::store("disk", std::io::Error::other("boom")).class(),
            ErrorClass::Internal
        );
    }

    #[test]
    fn store_error_keeps_source() {
        let err = VaultError::store("read failed", std::io::Error::other("boom"));
        let source = std::error::Error::source(&err).expect("source should be attached");
        assert_eq!(source.to_string(), "boom");
        assert_eq!(err.to_string(), "internal error: read failed");
    }
}
