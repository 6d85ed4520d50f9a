//! Test-vector conformance
//!
//! A vector file is a JSON array of records:
//!
//! ```json
//! [
//!   {
//!     "name": "zero-slot-zero-hash",
//!     "rng_version": "v1",
//!     "slot": 0,
//!     "blockhash": "11111111111111111111111111111111",
//!     "expected_winning_number": 9
//!   }
//! ]
//! ```
//!
//! `slot` may be a number or a decimal string. Every record must name
//! `rng_version` "v1"; anything else is rejected rather than skipped.

use crate::{
    error::VectorError,
    input::{slot_from_json, Range},
    verify::verify,
    RNG_VERSION,
};
use serde::Deserialize;
use serde_json::Value;
use std::{fs, path::Path};

/// One named expectation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    /// Vector name, reported on failure
    pub name: String,
    /// Algorithm version the vector was generated with
    pub rng_version: String,
    /// Slot
    pub slot: u64,
    /// Base58 blockhash
    pub blockhash: String,
    /// Winning number the verifier must produce
    pub expected_winning_number: u64,
}

/// Record as it appears on disk, before the slot is validated
#[derive(Debug, Deserialize)]
struct RawVector {
    name: String,
    rng_version: String,
    slot: Value,
    blockhash: String,
    expected_winning_number: u64,
}

/// Parse a JSON array of vectors.
///
/// Each record is checked on its own so a bad record is reported by index and
/// name instead of failing the whole file with a generic parse error.
pub fn parse_vectors(json: &str) -> Result<Vec<TestVector>, VectorError> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    if records.is_empty() {
        return Err(VectorError::Empty);
    }

    records.into_iter().enumerate().map(|(index, record)| parse_record(index, record)).collect()
}

/// Read and parse a vector file
pub fn load_vectors(path: impl AsRef<Path>) -> Result<Vec<TestVector>, VectorError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|source| VectorError::Io { path: path.to_path_buf(), source })?;

    let vectors = parse_vectors(&raw)?;
    tracing::debug!(target: "iseefortune", ?path, count = vectors.len(), "loaded test vectors");
    Ok(vectors)
}

fn parse_record(index: usize, record: Value) -> Result<TestVector, VectorError> {
    let name = record.get("name").and_then(Value::as_str).map(str::to_string);
    let malformed = |reason: String| VectorError::Malformed { index, name: name.clone(), reason };

    let raw: RawVector = serde_json::from_value(record).map_err(|e| malformed(e.to_string()))?;
    if raw.slot.is_null() {
        return Err(malformed("missing field `slot`".to_string()));
    }
    let slot = slot_from_json(&raw.slot).map_err(|e| malformed(e.to_string()))?;

    Ok(TestVector {
        name: raw.name,
        rng_version: raw.rng_version,
        slot,
        blockhash: raw.blockhash,
        expected_winning_number: raw.expected_winning_number,
    })
}

/// Check one vector, returning the computed winning number
pub fn check_vector(vector: &TestVector, range: Range) -> Result<u64, VectorError> {
    if vector.rng_version != RNG_VERSION {
        return Err(VectorError::UnsupportedVersion {
            name: vector.name.clone(),
            version: vector.rng_version.clone(),
        });
    }

    let result = verify(vector.slot, &vector.blockhash, range.get())
        .map_err(|source| VectorError::Verify { name: vector.name.clone(), source })?;

    if result.winning_number != vector.expected_winning_number {
        return Err(VectorError::Mismatch {
            name: vector.name.clone(),
            expected: vector.expected_winning_number,
            actual: result.winning_number,
        });
    }

    Ok(result.winning_number)
}

/// Result of checking one vector
#[derive(Debug)]
pub struct VectorOutcome {
    /// Vector name
    pub name: String,
    /// Computed winning number, or why the vector failed
    pub result: Result<u64, VectorError>,
}

/// Per-vector results of a batch run
#[derive(Debug, Default)]
pub struct ConformanceReport {
    /// Outcomes in file order
    pub outcomes: Vec<VectorOutcome>,
}

impl ConformanceReport {
    /// Number of vectors that passed
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.result.is_ok()).count()
    }

    /// Vectors that failed
    pub fn failures(&self) -> impl Iterator<Item = &VectorOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }

    /// Whether every vector passed
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Pass count, or the first failure
    pub fn into_result(self) -> Result<usize, VectorError> {
        let total = self.outcomes.len();
        for outcome in self.outcomes {
            outcome.result?;
        }
        Ok(total)
    }
}

/// Check every vector, continuing past failures
pub fn run_vectors(vectors: &[TestVector], range: Range) -> ConformanceReport {
    let outcomes = vectors
        .iter()
        .map(|vector| {
            let result = check_vector(vector, range);
            match &result {
                Ok(winning_number) => {
                    tracing::debug!(target: "iseefortune", name = %vector.name, winning_number, "vector passed");
                }
                Err(e) => {
                    tracing::warn!(target: "iseefortune", name = %vector.name, error = %e, "vector failed");
                }
            }
            VectorOutcome { name: vector.name.clone(), result }
        })
        .collect();

    ConformanceReport { outcomes }
}
