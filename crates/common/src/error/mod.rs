//! Domain-tagged generic errors shared by every FoundationKit helper
//!
//! Helpers in this crate fail in one of two ways:
//!
//! 1. **Absent result**: parsing and lookup helpers return `Option` (hex
//!    decoding, version parsing, executable lookup, ...).
//! 2. **[`GenericError`]**: side-effecting helpers (process execution, file
//!    system calls, URL opening, settings persistence) return a
//!    [`KitResult`] carrying a generic error value.
//!
//! A [`GenericError`] carries:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `domain` | Which family of helpers produced it ([`ErrorDomain`]) |
//! | `description` | Human-readable message, used as `Display` |
//! | `recovery_suggestion` | Optional hint for the caller |
//! | `code` | Optional numeric code (exit status, OS errno, HTTP status) |
//!
//! Errors are never retried inside the crate; callers handle them at the call
//! site.
//!
//! ## Examples
//!
//! ```rust
//! use foundationkit_common::error::{ErrorDomain, GenericError};
//!
//! let err = GenericError::process("Process terminated with failure (termination status code: 2)")
//!     .with_code(2)
//!     .with_recovery_suggestion("Check the command arguments.");
//!
//! assert_eq!(err.domain(), ErrorDomain::Process);
//! assert_eq!(err.code(), Some(2));
//! assert_eq!(err.to_string(), "Process terminated with failure (termination status code: 2)");
//! ```

use std::fmt;

use thiserror::Error;

/// Standard result type using [`GenericError`]
pub type KitResult<T> = Result<T, GenericError>;

/// Family of helpers an error originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorDomain {
    /// No specific domain
    Generic,
    /// Parsing of textual input (versions, choices, URLs)
    Parse,
    /// File system access
    FileSystem,
    /// Child process lookup and execution
    Process,
    /// URL loading and opening
    Url,
    /// Key/value settings storage
    Settings,
    /// Bundle and metadata introspection
    Bundle,
    /// Synchronous-wait bridge
    Sync,
    /// Serialization formats (JSON, TOML, property lists)
    Serialization,
}

impl ErrorDomain {
    /// Stable, lowercase name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Parse => "parse",
            Self::FileSystem => "file_system",
            Self::Process => "process",
            Self::Url => "url",
            Self::Settings => "settings",
            Self::Bundle => "bundle",
            Self::Sync => "sync",
            Self::Serialization => "serialization",
        }
    }
}

impl fmt::Display for ErrorDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generic, domain-tagged error with a human-readable description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct GenericError {
    domain: ErrorDomain,
    description: String,
    recovery_suggestion: Option<String>,
    code: Option<i64>,
}

impl GenericError {
    /// Create an error in the [`ErrorDomain::Generic`] domain
    pub fn new<S: Into<String>>(description: S) -> Self {
        Self::with_domain(ErrorDomain::Generic, description)
    }

    /// Create an error in an explicit domain
    pub fn with_domain<S: Into<String>>(domain: ErrorDomain, description: S) -> Self {
        Self { domain, description: description.into(), recovery_suggestion: None, code: None }
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(description: S) -> Self {
        Self::with_domain(ErrorDomain::Parse, description)
    }

    /// Create a file system error
    pub fn file_system<S: Into<String>>(description: S) -> Self {
        Self::with_domain(ErrorDomain::FileSystem, description)
    }

    /// Create a process error
    pub fn process<S: Into<String>>(description: S) -> Self {
        Self::with_domain(ErrorDomain::Process, description)
    }

    /// Create a URL error
    pub fn url<S: Into<String>>(description: S) -> Self {
        Self::with_domain(ErrorDomain::Url, description)
    }

    /// Create a settings storage error
    pub fn settings<S: Into<String>>(description: S) -> Self {
        Self::with_domain(ErrorDomain::Settings, description)
    }

    /// Create a bundle error
    pub fn bundle<S: Into<String>>(description: S) -> Self {
        Self::with_domain(ErrorDomain::Bundle, description)
    }

    /// Create a synchronous-wait bridge error
    pub fn sync<S: Into<String>>(description: S) -> Self {
        Self::with_domain(ErrorDomain::Sync, description)
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(description: S) -> Self {
        Self::with_domain(ErrorDomain::Serialization, description)
    }

    /// Attach a numeric code (fluent API)
    #[must_use]
    pub fn with_code(mut self, code: impl Into<i64>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach a recovery suggestion (fluent API)
    #[must_use]
    pub fn with_recovery_suggestion<S: Into<String>>(mut self, suggestion: S) -> Self {
        self.recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Domain the error belongs to
    #[must_use]
    pub const fn domain(&self) -> ErrorDomain {
        self.domain
    }

    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Optional recovery suggestion
    #[must_use]
    pub fn recovery_suggestion(&self) -> Option<&str> {
        self.recovery_suggestion.as_deref()
    }

    /// Optional numeric code
    #[must_use]
    pub const fn code(&self) -> Option<i64> {
        self.code
    }

    /// Description followed by the recovery suggestion, if any
    #[must_use]
    pub fn full_description(&self) -> String {
        match &self.recovery_suggestion {
            Some(suggestion) => format!("{} {}", self.description, suggestion),
            None => self.description.clone(),
        }
    }

    /// Convert error to structured logging fields
    ///
    /// Returns a vector of key-value pairs suitable for structured logging.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tracing::error;
    ///
    /// let err = GenericError::process("Executable “git” not found.");
    /// let fields = err.as_tracing_fields();
    /// error!(domain = %fields[0].1, description = %fields[1].1, "Helper failed");
    /// ```
    #[must_use]
    pub fn as_tracing_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("domain", self.domain.as_str().to_string()),
            ("description", self.description.clone()),
        ];
        if let Some(suggestion) = &self.recovery_suggestion {
            fields.push(("recovery_suggestion", suggestion.clone()));
        }
        if let Some(code) = self.code {
            fields.push(("code", code.to_string()));
        }
        fields
    }
}

// Standard conversions from common error types
impl From<std::io::Error> for GenericError {
    fn from(err: std::io::Error) -> Self {
        let code = err.raw_os_error();
        let generic = Self::file_system(err.to_string());
        match code {
            Some(code) => generic.with_code(code),
            None => generic,
        }
    }
}

impl From<serde_json::Error> for GenericError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {err}"))
    }
}

impl From<toml::de::Error> for GenericError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization(format!("TOML error: {err}"))
    }
}

impl From<toml::ser::Error> for GenericError {
    fn from(err: toml::ser::Error) -> Self {
        Self::serialization(format!("TOML error: {err}"))
    }
}

impl From<url::ParseError> for GenericError {
    fn from(err: url::ParseError) -> Self {
        Self::parse(format!("Invalid URL: {err}"))
    }
}

impl From<regex::Error> for GenericError {
    fn from(err: regex::Error) -> Self {
        Self::parse(format!("Invalid regular expression: {err}"))
    }
}

#[cfg(feature = "runtime")]
impl From<reqwest::Error> for GenericError {
    fn from(err: reqwest::Error) -> Self {
        let generic = Self::url(err.to_string());
        match err.status() {
            Some(status) => generic.with_code(status.as_u16()),
            None => generic,
        }
    }
}
