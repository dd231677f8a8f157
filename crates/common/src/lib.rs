//! Extension helpers for foundational types: strings, bytes, collections,
//! numbers, paths, dates, processes, URLs, settings and bundles.
//!
//! Most helpers are extension traits implemented for standard and
//! ecosystem types (`str`, `[T]`, `Path`, `url::Url`,
//! `chrono::DateTime`, `std::process::Command`). Import the trait and call
//! the method on the value.
//!
//! # Safety and Quality
//!
//! The crate forbids `unsafe` code. Fallible helpers return
//! [`KitResult`] with a domain-tagged [`GenericError`].
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: pure helpers (hex, text, collections, numeric, version,
//!   path, identifiers, time, property lists, configuration)
//! - `observability`: `tracing` events
//! - `runtime` (default): side-effecting helpers (sync bridge, processes,
//!   file system, URL loading and opening, settings, bundles, logging setup)
//! - `test-utils`: fixtures and assertion macros for downstream tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod bytes;
#[cfg(feature = "foundation")]
pub mod choice;
#[cfg(feature = "foundation")]
pub mod collections;
#[cfg(feature = "foundation")]
pub mod config;
#[cfg(feature = "foundation")]
pub mod error;
#[cfg(feature = "foundation")]
pub mod identifiers;
#[cfg(feature = "foundation")]
pub mod numeric;
#[cfg(feature = "foundation")]
pub mod path;
#[cfg(feature = "foundation")]
pub mod plist;
#[cfg(feature = "foundation")]
pub mod text;
#[cfg(feature = "foundation")]
pub mod time;
#[cfg(feature = "foundation")]
#[macro_use]
pub mod utils;
#[cfg(feature = "foundation")]
pub mod version;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod bundle;
#[cfg(feature = "runtime")]
pub mod fs;
#[cfg(feature = "runtime")]
pub mod observability;
#[cfg(feature = "runtime")]
pub mod process;
#[cfg(feature = "runtime")]
pub mod settings;
#[cfg(feature = "runtime")]
pub mod sync;
#[cfg(feature = "runtime")]
pub mod url;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(all(feature = "runtime", any(feature = "test-utils", test)))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use bytes::{BytesExt, HexDecode, HexEncode};
#[cfg(feature = "foundation")]
pub use choice::Choice;
#[cfg(feature = "foundation")]
pub use config::KitConfig;
#[cfg(feature = "foundation")]
pub use error::{ErrorDomain, GenericError, KitResult};
#[cfg(feature = "foundation")]
pub use text::{RegexExt, StrExt, StrSliceExt};
#[cfg(feature = "foundation")]
pub use utils::serde::hex_bytes;
#[cfg(feature = "foundation")]
pub use version::AppVersion;
