//! UUID helpers over raw bytes
//!
//! Formatting follows the uppercase hyphenated convention used across the
//! crate's hex output.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// UUID from exactly 16 bytes, `None` for any other length
#[must_use]
pub fn uuid_from_bytes(bytes: &[u8]) -> Option<Uuid> {
    Uuid::from_slice(bytes).ok()
}

/// Deterministic UUID derived from `data`
///
/// The first 16 bytes of the SHA-256 digest are used as-is, so equal inputs
/// always give equal identifiers.
#[must_use]
pub fn uuid_hashing(data: impl AsRef<[u8]>) -> Uuid {
    let digest = Sha256::digest(data.as_ref());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes)
}

/// Convenience methods on [`Uuid`]
pub trait UuidExt {
    /// The 16 raw bytes
    fn uuid_bytes(&self) -> Vec<u8>;

    /// Uppercase hyphenated form
    fn uppercase_string(&self) -> String;

    /// Whether every byte is zero
    fn is_zero(&self) -> bool;
}

impl UuidExt for Uuid {
    fn uuid_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn uppercase_string(&self) -> String {
        self.hyphenated().encode_upper(&mut Uuid::encode_buffer()).to_string()
    }

    fn is_zero(&self) -> bool {
        self.is_nil()
    }
}

/// The all-zero UUID
#[must_use]
pub const fn zero_uuid() -> Uuid {
    Uuid::nil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_from_bytes() {
        let bytes: Vec<u8> = (1..=16).collect();
        let uuid = uuid_from_bytes(&bytes).unwrap();
        assert_eq!(uuid.uppercase_string(), "01020304-0506-0708-090A-0B0C0D0E0F10");
        assert_eq!(uuid.uuid_bytes(), bytes);
    }

    /// Validates any length other than 16 is rejected.
    #[test]
    fn test_uuid_from_bytes_wrong_length() {
        assert!(uuid_from_bytes(&[0u8; 15]).is_none());
        assert!(uuid_from_bytes(&[0u8; 17]).is_none());
        assert!(uuid_from_bytes(&[]).is_none());
    }

    #[test]
    fn test_zero_uuid() {
        assert!(zero_uuid().is_zero());
        assert_eq!(zero_uuid().uuid_bytes(), vec![0u8; 16]);
        assert!(!Uuid::new_v4().is_zero());
    }

    /// Validates hashing is deterministic and input-sensitive.
    #[test]
    fn test_uuid_hashing() {
        assert_eq!(uuid_hashing("FoundationKit"), uuid_hashing(b"FoundationKit"));
        assert_ne!(uuid_hashing("FoundationKit"), uuid_hashing("FoundationKit2"));
        assert!(!uuid_hashing("").is_zero());
    }
}
