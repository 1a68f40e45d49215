//! Hex encoding for byte fields
//!
//! Bytes are written as lowercase hex with a `0x` prefix. Reading accepts the
//! prefix in either case, or no prefix at all, and decodes two characters per
//! byte left to right.
//!
//! # Usage
//!
//! ```ignore
//! use ocr_config::hex_codec::hex_array;
//!
//! #[derive(Serialize, Deserialize)]
//! struct MyType {
//!     #[serde(with = "hex_array")]
//!     key: [u8; 32],
//! }
//! ```

use crate::{OcrConfigError, Result};
use serde::{Deserialize, Deserializer, Serializer};

/// Encode bytes as lowercase `0x`-prefixed hex
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Remove a leading `0x` / `0X` if present
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode hex with an optional `0x` prefix
pub fn decode_hex(s: &str) -> std::result::Result<Vec<u8>, hex::FromHexError> {
    hex::decode(strip_hex_prefix(s))
}

/// Decode hex into exactly `N` bytes, reporting failures against `field`
pub fn decode_hex_array<const N: usize>(field: &str, s: &str) -> Result<[u8; N]> {
    let bytes = decode_hex(s)
        .map_err(|e| OcrConfigError::validation(field, format!("invalid hex: {e}")))?;
    bytes_to_array(field, &bytes)
}

/// Copy a slice into a fixed-size array, failing on any length mismatch
pub fn bytes_to_array<const N: usize>(field: &str, bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| {
        OcrConfigError::validation(field, format!("expected {N} bytes, got {}", bytes.len()))
    })
}

/// Serde module for fixed-size byte arrays as hex strings
///
/// Use with `#[serde(with = "hex_array")]`.
pub mod hex_array {
    use super::*;

    /// Serialize a byte array as `0x` hex
    pub fn serialize<S, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode_hex(bytes))
    }

    /// Deserialize a byte array from hex, rejecting wrong lengths
    pub fn deserialize<'de, D, const N: usize>(
        deserializer: D,
    ) -> std::result::Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = decode_hex(&s).map_err(serde::de::Error::custom)?;
        let len = bytes.len();
        bytes.try_into().map_err(|_| {
            serde::de::Error::custom(format!("expected {N} bytes of hex, got {len}"))
        })
    }
}

/// Serde module for sequences of fixed-size byte arrays as hex strings
///
/// Use with `#[serde(with = "hex_array_vec")]`.
pub mod hex_array_vec {
    use super::*;
    use serde::ser::SerializeSeq;

    /// Serialize each array as `0x` hex, preserving order
    pub fn serialize<S, const N: usize>(
        items: &[[u8; N]],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&encode_hex(item))?;
        }
        seq.end()
    }

    /// Deserialize a list of hex strings, each exactly `N` bytes
    pub fn deserialize<'de, D, const N: usize>(
        deserializer: D,
    ) -> std::result::Result<Vec<[u8; N]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings = Vec::<String>::deserialize(deserializer)?;
        strings
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let bytes = decode_hex(s).map_err(serde::de::Error::custom)?;
                let len = bytes.len();
                bytes.try_into().map_err(|_| {
                    serde::de::Error::custom(format!(
                        "item {i}: expected {N} bytes of hex, got {len}"
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct KeyContainer {
        #[serde(with = "hex_array")]
        key: [u8; 4],
        #[serde(with = "hex_array_vec")]
        blocks: Vec<[u8; 2]>,
    }

    #[test]
    fn test_hex_round_trip_lengths() {
        for len in [0usize, 1, 16, 20, 32] {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
            let encoded = encode_hex(&bytes);
            assert!(encoded.starts_with("0x"));
            assert_eq!(encoded, encoded.to_lowercase());
            assert_eq!(decode_hex(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn test_decode_accepts_any_prefix_case() {
        assert_eq!(decode_hex("0xABcd").unwrap(), vec![0xab, 0xcd]);
        assert_eq!(decode_hex("0XabCD").unwrap(), vec![0xab, 0xcd]);
        assert_eq!(decode_hex("abcd").unwrap(), vec![0xab, 0xcd]);
        assert!(decode_hex("0xabc").is_err());
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn test_decode_hex_array_reports_length() {
        let err = decode_hex_array::<4>("transmitAddress", "0x010203").unwrap_err();
        assert_eq!(
            err,
            OcrConfigError::validation("transmitAddress", "expected 4 bytes, got 3")
        );
        assert_eq!(decode_hex_array::<2>("x", "0x0102").unwrap(), [1, 2]);
    }

    #[test]
    fn test_serde_helpers() {
        let container = KeyContainer {
            key: [0xde, 0xad, 0xbe, 0xef],
            blocks: vec![[0, 1], [0xff, 0x10]],
        };
        let json = serde_json::to_string(&container).expect("should serialize");
        assert_eq!(
            json,
            r#"{"key":"0xdeadbeef","blocks":["0x0001","0xff10"]}"#
        );

        let restored: KeyContainer = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(container, restored);

        // Unprefixed and upper-case input is accepted
        let restored: KeyContainer =
            serde_json::from_str(r#"{"key":"DEADBEEF","blocks":[]}"#).expect("should deserialize");
        assert_eq!(restored.key, [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_serde_rejects_wrong_length() {
        let result: std::result::Result<KeyContainer, _> =
            serde_json::from_str(r#"{"key":"0xdead","blocks":[]}"#);
        assert!(result.is_err());

        let result: std::result::Result<KeyContainer, _> =
            serde_json::from_str(r#"{"key":"0xdeadbeef","blocks":["0x01"]}"#);
        assert!(result.is_err());
    }
}
