//! Test fixture generators
//!
//! Every generator takes a seed, so a failing test reproduces with the same
//! data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

/// Characters mixed into [`unicode_string_seeded`]: multi-byte letters,
/// symbols and ASCII
const UNICODE_ALPHABET: &[char] = &[
    'a', 'B', 'z', '0', '7', ' ', '_', '?', 'é', 'Ñ', 'ü', 'ç', '€', '漢', '字', '😀', '…',
];

/// Deterministic random bytes
///
/// # Examples
///
/// ```
/// use foundationkit_common::testing::fixtures::random_bytes_seeded;
///
/// assert_eq!(random_bytes_seeded(16, 7), random_bytes_seeded(16, 7));
/// ```
#[must_use]
pub fn random_bytes_seeded(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = vec![0u8; len];
    rng.fill(bytes.as_mut_slice());
    bytes
}

/// Deterministic alphanumeric string of `len` characters
#[must_use]
pub fn random_string_seeded(len: usize, seed: u64) -> String {
    use rand::distributions::Alphanumeric;

    let rng = StdRng::seed_from_u64(seed);
    rng.sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

/// Deterministic string of `len` characters mixing ASCII and multi-byte
/// characters, for character-count based helpers
#[must_use]
pub fn unicode_string_seeded(len: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| UNICODE_ALPHABET[rng.gen_range(0..UNICODE_ALPHABET.len())]).collect()
}

/// Information dictionary for an application bundle named `name`
#[must_use]
pub fn application_info(name: &str, identifier: &str) -> Value {
    json!({
        "CFBundleIdentifier": identifier,
        "CFBundleName": name,
        "CFBundleExecutable": name,
        "CFBundleShortVersionString": "1.0",
        "CFBundleVersion": "1",
    })
}

/// Information dictionary for an application extension plugging into
/// `extension_point`
#[must_use]
pub fn application_extension_info(identifier: &str, extension_point: &str) -> Value {
    json!({
        "CFBundleIdentifier": identifier,
        "NSExtension": { "NSExtensionPointIdentifier": extension_point },
    })
}
