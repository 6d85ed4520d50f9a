//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Input validation failure raised by the verifier.
///
/// Every variant is a local, terminal failure for the call that produced it.
/// None of them carry intermediate hashing state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Range is missing, fractional, zero or negative
    #[error("range must be a positive integer, got {0:?}")]
    InvalidRange(String),

    /// Slot text is not an integer at all
    #[error("slot must be an unsigned integer, got {0:?}")]
    InvalidSlot(String),

    /// Slot is negative or larger than `u64::MAX`
    #[error("slot must fit in u64: {0}")]
    SlotOutOfRange(String),

    /// Blockhash contains characters outside the base58 alphabet
    #[error("invalid base58 blockhash: {0}")]
    InvalidBase58(String),

    /// Blockhash decoded to something other than 32 bytes
    #[error("decoded blockhash must be 32 bytes, got {actual}")]
    InvalidBlockhashLength {
        /// Number of bytes the blockhash actually decoded to
        actual: usize,
    },
}

impl VerifyError {
    /// Stable name of the error kind, used by JSON error reports
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRange(_) => "InvalidRange",
            Self::InvalidSlot(_) => "InvalidSlot",
            Self::SlotOutOfRange(_) => "SlotOutOfRange",
            Self::InvalidBase58(_) => "InvalidBase58",
            Self::InvalidBlockhashLength { .. } => "InvalidBlockhashLength",
        }
    }
}

/// Failure while loading or checking a batch of test vectors
#[derive(Debug, Error)]
pub enum VectorError {
    /// The vector file holds no vectors
    #[error("vector file is empty; add at least one test vector")]
    Empty,

    /// The vector file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The vector file is not a JSON array
    #[error("failed to parse vector file: {0}")]
    Json(#[from] serde_json::Error),

    /// A record is missing a field or carries a value of the wrong shape
    #[error("malformed vector #{index} ({}): {reason}", .name.as_deref().unwrap_or("unnamed"))]
    Malformed {
        /// Position of the record in the file
        index: usize,
        /// Name of the record, when it has one
        name: Option<String>,
        /// What is wrong with the record
        reason: String,
    },

    /// The record targets an algorithm version this crate does not implement
    #[error("vector '{name}' uses unsupported rng_version {version:?}")]
    UnsupportedVersion {
        /// Vector name
        name: String,
        /// Version found in the record
        version: String,
    },

    /// The computed winning number differs from the expected one
    #[error("vector '{name}' mismatch: expected {expected}, got {actual}")]
    Mismatch {
        /// Vector name
        name: String,
        /// Winning number stored in the vector
        expected: u64,
        /// Winning number computed by the verifier
        actual: u64,
    },

    /// The vector's inputs were rejected by the verifier
    #[error("vector '{name}' failed: {source}")]
    Verify {
        /// Vector name
        name: String,
        /// Verifier error
        #[source]
        source: VerifyError,
    },
}

impl VectorError {
    /// Stable name of the error kind, used by JSON error reports
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "EmptyVectorFile",
            Self::Io { .. } => "Io",
            Self::Json(_) => "Json",
            Self::Malformed { .. } | Self::UnsupportedVersion { .. } => "MalformedVector",
            Self::Mismatch { .. } => "Mismatch",
            Self::Verify { source, .. } => source.kind(),
        }
    }

    /// Name of the vector the error is about, if any
    pub fn vector_name(&self) -> Option<&str> {
        match self {
            Self::Malformed { name, .. } => name.as_deref(),
            Self::UnsupportedVersion { name, .. } |
            Self::Mismatch { name, .. } |
            Self::Verify { name, .. } => Some(name.as_str()),
            Self::Empty | Self::Io { .. } | Self::Json(_) => None,
        }
    }
}
