//! Testing utilities and helpers
//!
//! - **[`assertions`]**: assertion macros for [`KitResult`] values
//!   (`assert_error_contains!`, `assert_error_domain!`,
//!   `assert_error_code!`)
//! - **[`fixtures`]**: deterministic, seeded test data
//! - **[`bundles`]**: temporary bundle directories
//!
//! ## Usage
//!
//! ```rust
//! use foundationkit_common::error::GenericError;
//! use foundationkit_common::testing::fixtures::random_bytes_seeded;
//!
//! let payload = random_bytes_seeded(64, 42);
//! assert_eq!(payload.len(), 64);
//!
//! let result: Result<(), GenericError> = Err(GenericError::new("Connection timeout"));
//! foundationkit_common::assert_error_contains!(result, "timeout");
//! ```
//!
//! [`KitResult`]: crate::error::KitResult

pub mod assertions;
pub mod bundles;
pub mod fixtures;

// Macros exported with #[macro_export] are available at crate root
pub use bundles::BundleFixture;
pub use fixtures::{random_bytes_seeded, random_string_seeded, unicode_string_seeded};
