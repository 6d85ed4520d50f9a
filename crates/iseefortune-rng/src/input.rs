//! Typed verifier inputs
//!
//! Front ends hand the verifier text (CLI flags, form fields) or JSON values
//! (test vectors). This module turns those into a `u64` slot, a [`Range`] and a
//! 32-byte [`BlockHash`], reporting the specific [`VerifyError`] kind for each
//! rejected value.

use crate::{error::VerifyError, BLOCKHASH_LEN, DEFAULT_RANGE};
use serde_json::Value;
use std::fmt;

/// 2^53, the largest float magnitude below which every integer is exact
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Positive bound of the output space `[0, range)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Range(u64);

impl Range {
    /// Create a range, rejecting zero
    pub fn new(value: u64) -> Result<Self, VerifyError> {
        if value == 0 {
            return Err(VerifyError::InvalidRange(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the bound as a plain integer
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parse a range from text.
    ///
    /// Integer-valued decimals such as `10.0` are accepted; fractions, signs,
    /// zero and empty input are not.
    pub fn parse(text: &str) -> Result<Self, VerifyError> {
        let trimmed = text.trim();
        let invalid = || VerifyError::InvalidRange(trimmed.to_string());

        let integral = match trimmed.split_once('.') {
            Some((whole, fraction)) if !fraction.is_empty() && is_zeros(fraction) => whole,
            Some(_) => return Err(invalid()),
            None => trimmed,
        };
        if !is_digits(integral) {
            return Err(invalid());
        }

        // all digits, so a parse failure can only be overflow
        let value = integral.parse::<u64>().map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }
}

impl Default for Range {
    fn default() -> Self {
        Self(DEFAULT_RANGE)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parse a slot from decimal text.
///
/// Negative values and values above `u64::MAX` are [`VerifyError::SlotOutOfRange`];
/// anything that is not a decimal integer is [`VerifyError::InvalidSlot`].
pub fn parse_slot(text: &str) -> Result<u64, VerifyError> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    if !is_digits(digits) {
        return Err(VerifyError::InvalidSlot(trimmed.to_string()));
    }

    if negative {
        if is_zeros(digits) {
            return Ok(0);
        }
        return Err(VerifyError::SlotOutOfRange(format!("{trimmed} is negative")));
    }

    digits
        .parse::<u64>()
        .map_err(|_| VerifyError::SlotOutOfRange(format!("{trimmed} exceeds {}", u64::MAX)))
}

/// Read a slot from a JSON value, either a number or a decimal string
pub fn slot_from_json(value: &Value) -> Result<u64, VerifyError> {
    match value {
        Value::Number(number) => {
            if let Some(slot) = number.as_u64() {
                return Ok(slot);
            }
            if number.is_i64() {
                return Err(VerifyError::SlotOutOfRange(format!("{number} is negative")));
            }

            // serde_json falls back to f64 for fractions and anything past u64;
            // only integers a float holds exactly are accepted
            match number.as_f64() {
                Some(float) if float.fract() != 0.0 => {
                    Err(VerifyError::InvalidSlot(number.to_string()))
                }
                Some(float) if float < 0.0 => {
                    Err(VerifyError::SlotOutOfRange(format!("{number} is negative")))
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Some(float) if float <= MAX_EXACT_F64 => Ok(float as u64),
                _ => Err(VerifyError::InvalidSlot(format!(
                    "{number} is not exact as a float; write the slot as a decimal string"
                ))),
            }
        }
        Value::String(text) => parse_slot(text),
        other => Err(VerifyError::InvalidSlot(other.to_string())),
    }
}

/// Finalized blockhash, 32 raw bytes
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHash([u8; BLOCKHASH_LEN]);

impl BlockHash {
    /// Wrap raw hash bytes
    pub const fn new(bytes: [u8; BLOCKHASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode a base58 blockhash (Bitcoin/Solana alphabet, no checksum).
    ///
    /// The decoded value must be exactly 32 bytes. It is never padded or
    /// truncated.
    pub fn from_base58(text: &str) -> Result<Self, VerifyError> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|e| VerifyError::InvalidBase58(e.to_string()))?;

        let bytes: [u8; BLOCKHASH_LEN] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| VerifyError::InvalidBlockhashLength { actual: bytes.len() })?;

        Ok(Self(bytes))
    }

    /// Raw hash bytes
    pub const fn as_bytes(&self) -> &[u8; BLOCKHASH_LEN] {
        &self.0
    }

    /// Base58 rendering of the hash
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BlockHash").field(&self.to_base58()).finish()
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_zeros(s: &str) -> bool {
    s.bytes().all(|b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_parse() {
        assert_eq!(Range::parse("10").unwrap().get(), 10);
        assert_eq!(Range::parse(" 7 ").unwrap().get(), 7);
        assert_eq!(Range::parse("10.0").unwrap().get(), 10);
        assert_eq!(Range::parse("1").unwrap().get(), 1);
        assert_eq!(Range::default().get(), DEFAULT_RANGE);
    }

    #[test]
    fn test_range_rejects_non_positive() {
        for text in ["0", "-1", "2.5", "", "ten", "+3", "1.", "18446744073709551616"] {
            let err = Range::parse(text).unwrap_err();
            assert_eq!(err.kind(), "InvalidRange", "input {text:?}");
        }
        assert!(matches!(Range::new(0), Err(VerifyError::InvalidRange(_))));
    }

    #[test]
    fn test_parse_slot() {
        assert_eq!(parse_slot("0").unwrap(), 0);
        assert_eq!(parse_slot("432863999").unwrap(), 432_863_999);
        assert_eq!(parse_slot("18446744073709551615").unwrap(), u64::MAX);
        assert_eq!(parse_slot("-0").unwrap(), 0);
        assert_eq!(parse_slot(" 42 ").unwrap(), 42);
        assert_eq!(parse_slot("\t18446744073709551615\n").unwrap(), u64::MAX);
    }

    #[test]
    fn test_parse_slot_out_of_range() {
        let err = parse_slot("18446744073709551616").unwrap_err();
        assert_eq!(err.kind(), "SlotOutOfRange");

        let err = parse_slot("-5").unwrap_err();
        assert_eq!(err.kind(), "SlotOutOfRange");
    }

    #[test]
    fn test_parse_slot_invalid() {
        for text in ["", "abc", "1e9", "12.5", "-", "0x10"] {
            let err = parse_slot(text).unwrap_err();
            assert_eq!(err.kind(), "InvalidSlot", "input {text:?}");
        }
    }

    #[test]
    fn test_slot_from_json() {
        assert_eq!(slot_from_json(&json!(42)).unwrap(), 42);
        assert_eq!(slot_from_json(&json!("18446744073709551615")).unwrap(), u64::MAX);
        assert_eq!(slot_from_json(&json!(5.0)).unwrap(), 5);

        assert_eq!(slot_from_json(&json!(-1)).unwrap_err().kind(), "SlotOutOfRange");
        assert_eq!(slot_from_json(&json!(1.5)).unwrap_err().kind(), "InvalidSlot");
        assert_eq!(slot_from_json(&json!(-5.0)).unwrap_err().kind(), "SlotOutOfRange");
        assert_eq!(slot_from_json(&json!(1e30)).unwrap_err().kind(), "InvalidSlot");
        assert_eq!(slot_from_json(&json!(null)).unwrap_err().kind(), "InvalidSlot");
        assert_eq!(slot_from_json(&json!(true)).unwrap_err().kind(), "InvalidSlot");
    }

    #[test]
    fn test_slot_from_json_rejects_inexact_float() {
        // rounds to 12345678901234567168 as an f64
        let err = slot_from_json(&json!(12345678901234567891.0)).unwrap_err();
        assert_eq!(err.kind(), "InvalidSlot");
        assert!(err.to_string().contains("decimal string"));

        let value: Value = serde_json::from_str("12345678901234567891.0").unwrap();
        assert_eq!(slot_from_json(&value).unwrap_err().kind(), "InvalidSlot");

        // 2^53 is the largest float slot taken as-is
        assert_eq!(slot_from_json(&json!(9007199254740992.0)).unwrap(), 1 << 53);
        assert_eq!(
            slot_from_json(&json!(9007199254740994.0)).unwrap_err().kind(),
            "InvalidSlot"
        );

        // the same slot as a string is exact
        assert_eq!(
            slot_from_json(&json!("12345678901234567891")).unwrap(),
            12_345_678_901_234_567_891
        );
    }

    #[test]
    fn test_blockhash_round_trip() {
        let hash = BlockHash::from_base58("11111111111111111111111111111111").unwrap();
        assert_eq!(hash.as_bytes(), &[0u8; 32]);
        assert_eq!(hash.to_base58(), "11111111111111111111111111111111");

        let hash = BlockHash::new([0xff; 32]);
        assert_eq!(hash.to_base58(), "JEKNVnkbo3jma5nREBBJCDoXFVeKkD56V3xKrvRmWxFG");
    }

    #[test]
    fn test_blockhash_length_rejection() {
        // 31 and 33 zero bytes
        let err = BlockHash::from_base58("1111111111111111111111111111111").unwrap_err();
        assert_eq!(err, VerifyError::InvalidBlockhashLength { actual: 31 });

        let err = BlockHash::from_base58("111111111111111111111111111111111").unwrap_err();
        assert_eq!(err, VerifyError::InvalidBlockhashLength { actual: 33 });

        // 31 and 33 bytes of 0x01
        let err = BlockHash::from_base58("tVojvhToWjQ8Xvo4UPx2Xz9eRy7auyYMmZBjc2XfN").unwrap_err();
        assert_eq!(err, VerifyError::InvalidBlockhashLength { actual: 31 });

        let err =
            BlockHash::from_base58("JJEfe6DcPM2ziB2vfUWDV6aHVerXRGkv3TcyvJUNGHZz").unwrap_err();
        assert_eq!(err, VerifyError::InvalidBlockhashLength { actual: 33 });

        let err = BlockHash::from_base58("").unwrap_err();
        assert_eq!(err, VerifyError::InvalidBlockhashLength { actual: 0 });
    }

    #[test]
    fn test_blockhash_invalid_base58() {
        // 0, O, I and l are not in the alphabet
        for text in ["0OIl", "1111111111111111111111111111111O", "abc-def"] {
            let err = BlockHash::from_base58(text).unwrap_err();
            assert_eq!(err.kind(), "InvalidBase58", "input {text:?}");
        }
    }
}
