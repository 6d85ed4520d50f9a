//! ISeeFortune winning-number derivation
//!
//! This crate recomputes the winning number of a round from two public inputs,
//! the slot number and the finalized Solana blockhash of that slot.
//!
//! Algorithm (`rng_version` "v1"):
//! - decode the base58 blockhash into exactly 32 bytes
//! - `digest = sha256(slot_le_bytes || blockhash_bytes)`
//! - sum all 32 digest bytes into a `u64`
//! - `winning_number = sum % range` (range defaults to 10)
//!
//! # Example
//!
//! ```rust
//! use iseefortune_rng::verify;
//!
//! let result = verify(0, "11111111111111111111111111111111", 10).unwrap();
//! assert_eq!(result.winning_number, 9);
//! assert_eq!(result.trace.digest_sum, 3899);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod vectors;
pub mod verify;

pub use config::Config;
pub use error::{VectorError, VerifyError};
pub use input::{parse_slot, slot_from_json, BlockHash, Range};
pub use report::{DebugReport, ErrorReport, Report, TextReport, TraceReport};
pub use vectors::{
    check_vector, load_vectors, parse_vectors, run_vectors, ConformanceReport, TestVector,
    VectorOutcome,
};
pub use verify::{
    compose_message, digest, digest_sum, encode_slot, verify, verify_hash, verify_text,
    DebugTrace, Digest, VerifyResult,
};

/// Algorithm version tag carried by every report and test vector
pub const RNG_VERSION: &str = "v1";

/// Output range used when the caller does not pick one
pub const DEFAULT_RANGE: u64 = 10;

/// Length of the little-endian slot encoding
pub const SLOT_LEN: usize = 8;

/// Length of a decoded blockhash
pub const BLOCKHASH_LEN: usize = 32;

/// Length of the hashed message (`slot || blockhash`)
pub const MESSAGE_LEN: usize = SLOT_LEN + BLOCKHASH_LEN;
