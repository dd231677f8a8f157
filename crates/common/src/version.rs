//! Dotted application versions (`major.minor[.patch]`)
//!
//! ```rust
//! use foundationkit_common::version::AppVersion;
//!
//! let installed = AppVersion::parse("10.15").unwrap();
//! assert_eq!(installed, AppVersion::new(10, 15, 0));
//! assert!(installed < "10.15.7".parse::<AppVersion>().unwrap());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GenericError;

/// A `major.minor.patch` version ordered component by component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AppVersion {
    /// Incremented for incompatible releases
    pub major: u64,
    /// Incremented for compatible feature releases
    pub minor: u64,
    /// Incremented for fixes; zero when the text omits it
    pub patch: u64,
}

impl AppVersion {
    /// Version from its three components
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// Parse a dotted version string
    ///
    /// Components that are not unsigned integers are skipped. At least two
    /// numeric components are required; a missing patch is zero and anything
    /// after the third is ignored.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let components: Vec<u64> =
            text.split('.').filter_map(|component| component.parse().ok()).collect();

        match components.as_slice() {
            [major, minor] => Some(Self::new(*major, *minor, 0)),
            [major, minor, patch, ..] => Some(Self::new(*major, *minor, *patch)),
            _ => None,
        }
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for AppVersion {
    type Err = GenericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GenericError::parse(format!("Invalid version “{s}”.")))
    }
}

impl Serialize for AppVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AppVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
