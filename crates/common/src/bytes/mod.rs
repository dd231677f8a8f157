//! Byte buffer helpers
//!
//! - **[`hex`]**: uppercase hex encoding and lenient hex decoding
//! - random buffers and human-readable byte counts
//!
//! Writing a buffer to a temporary file lives in
//! [`fs::write_temporary_file`](crate::fs::write_temporary_file) because it
//! touches the file system.

pub mod hex;

use rand::RngCore;

pub use self::hex::{HexDecode, HexEncode};

/// Returns `count` random bytes from the thread-local generator
#[must_use]
pub fn random_bytes(count: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; count];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

const BYTE_UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Formats a byte count the way file browsers do (decimal units)
///
/// Counts under 1000 are spelled out in bytes; kilobytes are rounded to whole
/// units, megabytes to one decimal, larger units to two decimals. Trailing
/// zero decimals are dropped.
///
/// ```rust
/// use foundationkit_common::bytes::byte_count_string;
///
/// assert_eq!(byte_count_string(0), "Zero bytes");
/// assert_eq!(byte_count_string(1), "1 byte");
/// assert_eq!(byte_count_string(1_500), "2 KB");
/// assert_eq!(byte_count_string(1_260_000), "1.3 MB");
/// assert_eq!(byte_count_string(3_000_000_000), "3 GB");
/// ```
#[must_use]
pub fn byte_count_string(count: u64) -> String {
    match count {
        0 => return "Zero bytes".to_string(),
        1 => return "1 byte".to_string(),
        2..=999 => return format!("{count} bytes"),
        _ => {}
    }

    #[allow(clippy::cast_precision_loss)]
    let mut value = count as f64 / 1000.0;
    let mut unit = 0;
    while value >= 999.5 && unit < BYTE_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    let decimals = match unit {
        0 => 0,
        1 => 1,
        _ => 2,
    };
    let formatted = format!("{value:.decimals$}");
    let formatted = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted
    };
    format!("{formatted} {}", BYTE_UNITS[unit])
}

/// Byte-buffer conveniences beyond hex
pub trait BytesExt {
    /// Human-readable size of the buffer
    fn byte_count_string(&self) -> String;
}

impl<T: AsRef<[u8]> + ?Sized> BytesExt for T {
    fn byte_count_string(&self) -> String {
        byte_count_string(self.as_ref().len() as u64)
    }
}
