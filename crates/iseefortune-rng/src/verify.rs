//! Winning-number verifier
//!
//! Pure and stateless: identical inputs give bit-identical results on every
//! call and every platform. The only side effect is a `tracing` debug event.

use crate::{
    error::VerifyError,
    input::{parse_slot, BlockHash, Range},
    BLOCKHASH_LEN, MESSAGE_LEN, SLOT_LEN,
};
use sha2::{Digest as _, Sha256};

/// SHA-256 output
pub type Digest = [u8; 32];

/// Outcome of a verification, with every intermediate value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    /// Slot used in the RNG
    pub slot: u64,
    /// Blockhash as supplied by the caller (base58)
    pub blockhash: String,
    /// Bound of the output space
    pub range: u64,
    /// `digest_sum % range`
    pub winning_number: u64,
    /// Intermediate values, for display only
    pub trace: DebugTrace,
}

/// Intermediate values of one verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugTrace {
    /// Number of bytes the blockhash decoded to (always 32)
    pub decoded_len: usize,
    /// Little-endian slot encoding
    pub slot_le: [u8; SLOT_LEN],
    /// Decoded blockhash bytes
    pub blockhash_bytes: [u8; BLOCKHASH_LEN],
    /// `slot_le || blockhash_bytes`
    pub message: [u8; MESSAGE_LEN],
    /// SHA-256 of the message
    pub digest: Digest,
    /// Sum of the digest bytes
    pub digest_sum: u64,
    /// Modulus applied to the sum
    pub modulus: u64,
}

impl DebugTrace {
    /// Hex of the little-endian slot bytes
    pub fn slot_le_hex(&self) -> String {
        hex::encode(self.slot_le)
    }

    /// Hex of the decoded blockhash
    pub fn blockhash_hex(&self) -> String {
        hex::encode(self.blockhash_bytes)
    }

    /// Hex of the hashed message
    pub fn message_hex(&self) -> String {
        hex::encode(self.message)
    }

    /// Lowercase hex of the digest (64 chars)
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

/// Encode a slot as 8 bytes, least-significant byte first
pub const fn encode_slot(slot: u64) -> [u8; SLOT_LEN] {
    slot.to_le_bytes()
}

/// Build the 40-byte message `slot_le || blockhash`
pub fn compose_message(slot: u64, blockhash: &BlockHash) -> [u8; MESSAGE_LEN] {
    let mut message = [0u8; MESSAGE_LEN];
    message[..SLOT_LEN].copy_from_slice(&encode_slot(slot));
    message[SLOT_LEN..].copy_from_slice(blockhash.as_bytes());
    message
}

/// SHA-256 of the message
pub fn digest(message: &[u8; MESSAGE_LEN]) -> Digest {
    Sha256::digest(message).into()
}

/// Sum of the digest bytes. At most 32 * 255 = 8160.
pub fn digest_sum(digest: &Digest) -> u64 {
    digest.iter().map(|&b| u64::from(b)).sum()
}

/// Recompute the winning number for `(slot, blockhash)`.
///
/// Checks run in order: range, base58, blockhash length. The first failure is
/// returned and nothing else is computed.
pub fn verify(slot: u64, blockhash_base58: &str, range: u64) -> Result<VerifyResult, VerifyError> {
    let range = Range::new(range)?;
    verify_in_range(slot, blockhash_base58, range)
}

/// Like [`verify`] but takes every input as text, as entered in a CLI or form.
///
/// Validation order is range, slot, base58, blockhash length.
pub fn verify_text(
    slot: &str,
    blockhash_base58: &str,
    range: &str,
) -> Result<VerifyResult, VerifyError> {
    let range = Range::parse(range)?;
    let slot = parse_slot(slot)?;
    verify_in_range(slot, blockhash_base58.trim(), range)
}

/// Verify with an already-decoded blockhash. Cannot fail.
pub fn verify_hash(slot: u64, blockhash: &BlockHash, range: Range) -> VerifyResult {
    compute(slot, blockhash.to_base58(), blockhash, range)
}

fn verify_in_range(
    slot: u64,
    blockhash_base58: &str,
    range: Range,
) -> Result<VerifyResult, VerifyError> {
    let blockhash = BlockHash::from_base58(blockhash_base58).inspect_err(|e| {
        tracing::debug!(target: "iseefortune", slot, error = %e, "rejected blockhash");
    })?;
    Ok(compute(slot, blockhash_base58.to_string(), &blockhash, range))
}

fn compute(slot: u64, echo: String, blockhash: &BlockHash, range: Range) -> VerifyResult {
    let message = compose_message(slot, blockhash);
    let digest = digest(&message);
    let sum = digest_sum(&digest);
    let winning_number = sum % range.get();

    tracing::debug!(
        target: "iseefortune",
        slot,
        range = range.get(),
        digest_sum = sum,
        winning_number,
        "verified winning number"
    );

    VerifyResult {
        slot,
        blockhash: echo,
        range: range.get(),
        winning_number,
        trace: DebugTrace {
            decoded_len: BLOCKHASH_LEN,
            slot_le: encode_slot(slot),
            blockhash_bytes: *blockhash.as_bytes(),
            message,
            digest,
            digest_sum: sum,
            modulus: range.get(),
        },
    }
}
