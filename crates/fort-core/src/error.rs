//! # Error Types: Structured Error Taxonomy
//!
//! Defines the error types used throughout the FORT stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every failure a caller can cause maps to exactly one `FortError`
//!   variant, so the HTTP facade can translate it without string matching.
//! - Validation errors (`Format`, `Range`, `Dimension`) are raised before
//!   any cryptographic operation. The signer never sees malformed input.
//! - Messages are short and never contain key material.

use thiserror::Error;

/// Top-level error type for the FORT stack.
#[derive(Error, Debug)]
pub enum FortError {
    /// Startup configuration is missing or invalid. Fatal, startup only.
    #[error("configuration error: {0}")]
    Config(String),

    /// The model file is missing, unreadable, or structurally invalid.
    #[error("model load error: {0}")]
    ModelLoad(String),

    /// Malformed hex/base64/address input or a wrong byte length.
    #[error("format error: {0}")]
    Format(String),

    /// A feature vector does not match the model dimension.
    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    Dimension {
        /// Dimension the model expects.
        expected: usize,
        /// Dimension that was supplied.
        actual: usize,
    },

    /// A score outside the contract range.
    #[error("score {value} out of range [{min}, {max}]")]
    Range {
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },

    /// No input artifact matched the selection rule.
    #[error("not found: {0}")]
    NotFound(String),

    /// The ledger could not be parsed into entries.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FortError {
    /// Build a [`FortError::Range`] for a score outside `[min, max]`.
    pub fn score_out_of_range(value: i64, min: u64, max: u64) -> Self {
        Self::Range { value, min, max }
    }
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Integers beyond 2^53 have no exact IEEE-754 double form, so their
    /// canonical rendering differs between implementations.
    #[error("integer {0} exceeds the exactly representable range (|n| <= 2^53)")]
    UnsafeInteger(String),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key parsing failed.
    #[error("key error: {0}")]
    KeyError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_display() {
        let err = FortError::score_out_of_range(1001, 0, 1000);
        assert_eq!(err.to_string(), "score 1001 out of range [0, 1000]");
    }

    #[test]
    fn test_dimension_error_display() {
        let err = FortError::Dimension {
            expected: 11,
            actual: 10,
        };
        assert!(err.to_string().contains("expected 11"));
        assert!(err.to_string().contains("got 10"));
    }

    #[test]
    fn test_crypto_error_converts() {
        let err: FortError = CryptoError::KeyError("bad seed".into()).into();
        assert!(matches!(err, FortError::Crypto(_)));
    }
}
