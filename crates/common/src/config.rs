//! Library configuration
//!
//! [`KitConfig`] gathers the knobs the side-effecting helpers read: the
//! autocleaned temporary directory name, extra executable search
//! directories, the command used to open URLs and logging output. It loads
//! from TOML and can be overridden from the environment.
//!
//! ```rust
//! use foundationkit_common::config::KitConfig;
//!
//! let config = KitConfig::from_toml_str(
//!     r#"
//!     temporary_directory_name = "MyAppScratch"
//!     extra_executable_directories = ["/opt/tools/bin"]
//!
//!     [logging]
//!     filter = "foundationkit_common=debug"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.temporary_directory_name, "MyAppScratch");
//! assert!(config.open_command.is_none());
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GenericError, KitResult};

/// Environment variable holding a tracing filter directive
pub const ENV_LOG: &str = "FOUNDATIONKIT_LOG";
/// Environment variable switching log output to JSON (`1`/`true`)
pub const ENV_LOG_JSON: &str = "FOUNDATIONKIT_LOG_JSON";
/// Environment variable naming the command used to open URLs
pub const ENV_OPEN_COMMAND: &str = "FOUNDATIONKIT_OPEN_COMMAND";

/// Default name of the per-process scratch directory
pub const DEFAULT_TEMPORARY_DIRECTORY_NAME: &str = "AutocleanedTemporaryDirectory";

/// Default filter directive when none is configured
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Logging output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive (default: `info`)
    pub filter: String,

    /// Emit JSON lines instead of human-readable text (default: false)
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_LOG_FILTER.to_string(), json: false }
    }
}

/// Configuration for the side-effecting helpers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    /// Directory name under the system temporary directory that is wiped
    /// once per process (default: `AutocleanedTemporaryDirectory`)
    pub temporary_directory_name: String,

    /// Searched after the `PATH` entries when looking up executables
    pub extra_executable_directories: Vec<PathBuf>,

    /// Command used to open files and URLs; the platform opener when unset
    pub open_command: Option<String>,

    /// Logging output
    pub logging: LoggingConfig,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            temporary_directory_name: DEFAULT_TEMPORARY_DIRECTORY_NAME.to_string(),
            extra_executable_directories: Vec::new(),
            open_command: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl KitConfig {
    /// Parse a TOML document; missing keys take their defaults
    ///
    /// # Errors
    /// Returns a serialization error for malformed TOML or a parse error
    /// when the values fail [`KitConfig::validate`].
    pub fn from_toml_str(text: &str) -> KitResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// Returns a file system error when the file cannot be read, otherwise
    /// the errors of [`KitConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> KitResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns a serialization error if TOML encoding fails.
    pub fn to_toml_string(&self) -> KitResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Apply `FOUNDATIONKIT_*` environment overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides looked up by variable name
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(filter) = lookup(ENV_LOG) {
            self.logging.filter = filter;
        }
        if let Some(json) = lookup(ENV_LOG_JSON) {
            self.logging.json = matches!(json.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(command) = lookup(ENV_OPEN_COMMAND) {
            self.open_command = Some(command);
        }
        self
    }

    /// Set the temporary directory name
    #[must_use]
    pub fn with_temporary_directory_name(mut self, name: impl Into<String>) -> Self {
        self.temporary_directory_name = name.into();
        self
    }

    /// Add a directory searched for executables after `PATH`
    #[must_use]
    pub fn with_executable_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.extra_executable_directories.push(directory.into());
        self
    }

    /// Set the command used to open URLs
    #[must_use]
    pub fn with_open_command(mut self, command: impl Into<String>) -> Self {
        self.open_command = Some(command.into());
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns a parse error naming the first invalid field.
    pub fn validate(&self) -> KitResult<()> {
        let name = self.temporary_directory_name.as_str();
        if name.trim().is_empty() {
            return Err(GenericError::parse("temporary_directory_name cannot be empty"));
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(GenericError::parse(format!(
                "temporary_directory_name must be a single directory name, got “{name}”"
            )));
        }

        if self.extra_executable_directories.iter().any(|dir| dir.as_os_str().is_empty()) {
            return Err(GenericError::parse("extra_executable_directories cannot contain empty paths"));
        }

        if self.open_command.as_deref().is_some_and(|command| command.trim().is_empty()) {
            return Err(GenericError::parse("open_command cannot be empty"));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(GenericError::parse("logging.filter cannot be empty"));
        }

        Ok(())
    }
}
