//! Output records for front ends
//!
//! [`Report`] is the JSON shape shared with existing verifiers and test
//! vectors. [`TextReport`] renders the same data for humans.

use crate::{
    error::{VectorError, VerifyError},
    verify::VerifyResult,
    DEFAULT_RANGE, RNG_VERSION,
};
use serde::Serialize;
use std::fmt;

/// JSON output of one verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Algorithm version, always "v1"
    pub rng_version: &'static str,
    /// Decimal slot, as a string to survive JSON number precision
    pub slot: String,
    /// Echoed base58 blockhash
    pub blockhash: String,
    /// Winning number in `[0, range)`
    pub winning_number: u64,
    /// Range, only present when it is not the default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<u64>,
    /// Digest and sum, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugReport>,
    /// Every intermediate value, present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceReport>,
}

/// `debug` section of a [`Report`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugReport {
    /// 64 lowercase hex chars
    pub digest_sha256: String,
    /// Decimal digest sum
    pub digest_sum_u64: String,
}

/// `trace` section of a [`Report`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    /// Decoded blockhash length
    pub decoded_len: usize,
    /// Hex of the little-endian slot
    pub slot_u64_le_hex: String,
    /// Hex of the decoded blockhash
    pub blockhash_bytes_hex: String,
    /// Hex of `slot_le || blockhash`
    pub message_hex: String,
    /// Hex of the digest
    pub digest_sha256: String,
    /// Decimal digest sum
    pub digest_sum_u64: String,
    /// Modulus applied to the sum
    pub modulus: u64,
}

impl Report {
    /// Build a report, optionally with the `debug` and `trace` sections
    pub fn new(result: &VerifyResult, debug: bool, full_trace: bool) -> Self {
        let trace = &result.trace;
        Self {
            rng_version: RNG_VERSION,
            slot: result.slot.to_string(),
            blockhash: result.blockhash.clone(),
            winning_number: result.winning_number,
            range: (result.range != DEFAULT_RANGE).then_some(result.range),
            debug: debug.then(|| DebugReport {
                digest_sha256: trace.digest_hex(),
                digest_sum_u64: trace.digest_sum.to_string(),
            }),
            trace: full_trace.then(|| TraceReport {
                decoded_len: trace.decoded_len,
                slot_u64_le_hex: trace.slot_le_hex(),
                blockhash_bytes_hex: trace.blockhash_hex(),
                message_hex: trace.message_hex(),
                digest_sha256: trace.digest_hex(),
                digest_sum_u64: trace.digest_sum.to_string(),
                modulus: trace.modulus,
            }),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// JSON error output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// Human-readable message
    pub error: String,
    /// Stable error kind, e.g. "InvalidBase58"
    pub kind: &'static str,
    /// Vector name, for batch failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<String>,
}

impl From<&VerifyError> for ErrorReport {
    fn from(err: &VerifyError) -> Self {
        Self { error: err.to_string(), kind: err.kind(), vector: None }
    }
}

impl From<&VectorError> for ErrorReport {
    fn from(err: &VectorError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
            vector: err.vector_name().map(str::to_string),
        }
    }
}

/// Human-readable rendering of a [`VerifyResult`]
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    result: &'a VerifyResult,
    full: bool,
}

impl<'a> TextReport<'a> {
    /// Render the summary, plus every intermediate when `full` is set
    pub const fn new(result: &'a VerifyResult, full: bool) -> Self {
        Self { result, full }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(f, "rng_version     {RNG_VERSION}")?;
        writeln!(f, "slot            {}", result.slot)?;
        writeln!(f, "blockhash       {}", result.blockhash)?;
        writeln!(f, "range           {}", result.range)?;
        write!(f, "winning_number  {}", result.winning_number)?;

        if self.full {
            let trace = &result.trace;
            writeln!(f)?;
            writeln!(f)?;
            writeln!(f, "decoded_len     {}", trace.decoded_len)?;
            writeln!(f, "slot_u64_le     {}", trace.slot_le_hex())?;
            writeln!(f, "blockhash_hex   {}", trace.blockhash_hex())?;
            writeln!(f, "message         {}", trace.message_hex())?;
            writeln!(f, "digest_sha256   {}", trace.digest_hex())?;
            writeln!(f, "digest_sum      {}", trace.digest_sum)?;
            write!(
                f,
                "modulus         {} ({} % {} = {})",
                trace.modulus, trace.digest_sum, trace.modulus, result.winning_number
            )?;
        }
        Ok(())
    }
}
