//! Hexadecimal codec for byte buffers
//!
//! Encoding always produces uppercase digits and never fails. Decoding
//! accepts an optional `0x`/`0X` prefix and surrounding whitespace, is
//! case-insensitive, and returns `None` when the cleaned input has an odd
//! number of digits or contains a non-hex character.
//!
//! ```rust
//! use foundationkit_common::bytes::hex;
//!
//! assert_eq!(hex::encode(&[0xDE, 0xAD, 0x01]), "DEAD01");
//! assert_eq!(hex::encode_prefixed(&[0x0F], hex::DEFAULT_PREFIX), "0x0F");
//! assert_eq!(hex::decode("0xdead01"), Some(vec![0xDE, 0xAD, 0x01]));
//! assert_eq!(hex::decode("ABC"), None);
//! ```

/// Prefix used by [`encode_prefixed`] callers that want C-style literals
pub const DEFAULT_PREFIX: &str = "0x";

/// Encode bytes as uppercase hexadecimal
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    ::hex::encode_upper(bytes)
}

/// Encode bytes as uppercase hexadecimal after `prefix`
#[must_use]
pub fn encode_prefixed(bytes: &[u8], prefix: &str) -> String {
    let mut encoded = String::with_capacity(prefix.len() + bytes.len() * 2);
    encoded.push_str(prefix);
    encoded.push_str(&encode(bytes));
    encoded
}

/// Decode a hexadecimal string into bytes
///
/// Returns `None` on an odd digit count or any non-hex character.
#[must_use]
pub fn decode(text: &str) -> Option<Vec<u8>> {
    ::hex::decode(strip_prefix(text)).ok()
}

fn strip_prefix(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

/// Hex encoding on byte buffers
pub trait HexEncode {
    /// Uppercase hexadecimal representation
    fn hex_string(&self) -> String;

    /// Uppercase hexadecimal representation after `prefix`
    fn hex_string_prefixed(&self, prefix: &str) -> String;
}

impl<T: AsRef<[u8]> + ?Sized> HexEncode for T {
    fn hex_string(&self) -> String {
        encode(self.as_ref())
    }

    fn hex_string_prefixed(&self, prefix: &str) -> String {
        encode_prefixed(self.as_ref(), prefix)
    }
}

/// Hex decoding on strings
pub trait HexDecode {
    /// Bytes represented by this hexadecimal string, if valid
    fn hex_bytes(&self) -> Option<Vec<u8>>;
}

impl HexDecode for str {
    fn hex_bytes(&self) -> Option<Vec<u8>> {
        decode(self)
    }
}
