//! Error type for configuration builds
//!
//! Every failure is fatal to the build it occurs in. Validation errors name the
//! offending field, envelope errors name the offending recipient when there is one.

use serde::{Deserialize, Serialize};

/// Unified error type for OCR configuration operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum OcrConfigError {
    /// Malformed or mis-sized input field
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the field that failed validation
        field: String,
        /// Error message describing the invalid input
        message: String,
    },

    /// Malformed cryptographic material during envelope encryption
    #[error("{}", envelope_display(.recipient, .message))]
    Envelope {
        /// Index of the recipient key at fault, if the failure is per-recipient
        recipient: Option<usize>,
        /// Error message describing the cryptographic failure
        message: String,
    },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },
}

fn envelope_display(recipient: &Option<usize>, message: &str) -> String {
    match recipient {
        Some(index) => format!("Envelope error (recipient {index}): {message}"),
        None => format!("Envelope error: {message}"),
    }
}

impl OcrConfigError {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an envelope error not tied to a recipient
    pub fn envelope(message: impl Into<String>) -> Self {
        Self::Envelope {
            recipient: None,
            message: message.into(),
        }
    }

    /// Create an envelope error for the recipient at `index`
    pub fn recipient(index: usize, message: impl Into<String>) -> Self {
        Self::Envelope {
            recipient: Some(index),
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// True for input validation failures
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// True for envelope encryption failures
    pub fn is_envelope(&self) -> bool {
        matches!(self, Self::Envelope { .. })
    }
}

/// Standard Result type for configuration operations
pub type Result<T> = std::result::Result<T, OcrConfigError>;

impl From<serde_json::Error> for OcrConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_names_field() {
        let err = OcrConfigError::validation("offchainPublicKey", "expected 32 bytes, got 31");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid offchainPublicKey: expected 32 bytes, got 31"
        );
    }

    #[test]
    fn test_envelope_display_names_recipient() {
        let err = OcrConfigError::recipient(2, "public key must be 32 bytes");
        assert!(err.is_envelope());
        assert_eq!(
            err.to_string(),
            "Envelope error (recipient 2): public key must be 32 bytes"
        );

        let err = OcrConfigError::envelope("shared secret must be 16 bytes");
        assert_eq!(err.to_string(), "Envelope error: shared secret must be 16 bytes");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u64>("not json").unwrap_err();
        let err = OcrConfigError::from(json_err);
        assert!(matches!(err, OcrConfigError::Serialization { .. }));
    }
}
