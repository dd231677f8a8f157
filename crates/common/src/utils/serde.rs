//! Serialization utilities for common data types
//!
//! This module provides reusable serde serialization and deserialization
//! utilities that are used across multiple modules in the application.

use serde::{Deserialize, Deserializer, Serializer};

/// Custom serialization module for byte buffers as uppercase hex strings
///
/// This module provides serialize and deserialize functions for `Vec<u8>`
/// that convert to/from a hexadecimal string for JSON/TOML compatibility.
/// Deserialization accepts the same inputs as
/// [`bytes::hex::decode`](crate::bytes::hex::decode).
///
/// # Usage
/// ```rust
/// use foundationkit_common::hex_bytes;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Example {
///     #[serde(with = "hex_bytes")]
///     digest: Vec<u8>,
/// }
/// ```
pub mod hex_bytes {
    use super::*;
    use crate::bytes::hex;

    /// Serde serialization result type
    type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

    /// Serialize bytes as an uppercase hex string
    pub fn serialize<S>(bytes: &[u8], serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    /// Deserialize a hex string into bytes
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        hex::decode(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex string: {text}")))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for serialization utilities
    //!
    //! Tests cover hex_bytes serialization/deserialization, round-trip
    //! conversion, and rejection of malformed input.

    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct TestStruct {
        #[serde(with = "hex_bytes")]
        digest: Vec<u8>,
        name: String,
    }

    /// Tests that bytes serialize to an uppercase hex string
    #[test]
    fn test_hex_bytes_serialize() {
        let data = TestStruct { digest: vec![0xCA, 0xFE], name: "test".to_string() };

        let json = serde_json::to_string(&data).expect("Should serialize valid struct");
        assert!(json.contains("\"CAFE\""), "Should contain hex value");
        assert!(json.contains("test"), "Should contain string field");
    }

    /// Tests that lowercase and prefixed hex deserialize
    #[test]
    fn test_hex_bytes_deserialize() {
        let json = r#"{"digest":"0xcafe","name":"test"}"#;
        let data: TestStruct = serde_json::from_str(json).expect("Should deserialize valid JSON");

        assert_eq!(data.digest, vec![0xCA, 0xFE]);
        assert_eq!(data.name, "test");
    }

    /// Tests round-trip serialization and deserialization
    #[test]
    fn test_hex_bytes_round_trip() {
        let original = TestStruct { digest: (0..=32).collect(), name: "round_trip".to_string() };

        let json = serde_json::to_string(&original).expect("Should serialize");
        let deserialized: TestStruct = serde_json::from_str(&json).expect("Should deserialize");

        assert_eq!(original, deserialized, "Round-trip should preserve data");
    }

    /// Validates empty buffers serialize to an empty string.
    #[test]
    fn test_hex_bytes_empty() {
        let data = TestStruct { digest: vec![], name: "empty".to_string() };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"digest\":\"\""));

        let deserialized: TestStruct = serde_json::from_str(&json).unwrap();
        assert!(deserialized.digest.is_empty());
    }

    /// Validates odd-length and non-hex strings fail to deserialize.
    #[test]
    fn test_hex_bytes_deserialize_invalid() {
        let odd = r#"{"digest":"ABC","name":"test"}"#;
        assert!(serde_json::from_str::<TestStruct>(odd).is_err());

        let non_hex = r#"{"digest":"ZZ","name":"test"}"#;
        let err = serde_json::from_str::<TestStruct>(non_hex).unwrap_err();
        assert!(err.to_string().contains("invalid hex string"));
    }
}
