//! Logging setup for applications built on the helpers
//!
//! The helpers only emit `tracing` events. Applications that have no
//! subscriber of their own can call [`init_tracing`] once at startup.
//!
//! ```rust,no_run
//! use foundationkit_common::config::KitConfig;
//! use foundationkit_common::observability::init_tracing;
//!
//! let config = KitConfig::default().with_env_overrides();
//! init_tracing(&config.logging)?;
//! # Ok::<(), foundationkit_common::error::GenericError>(())
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, ENV_LOG};
use crate::error::{GenericError, KitResult};

/// Filter built from `FOUNDATIONKIT_LOG` when set, otherwise from the
/// configured directive
///
/// # Errors
/// Returns a parse error when the directive is invalid.
pub fn env_filter(config: &LoggingConfig) -> KitResult<EnvFilter> {
    let directive = std::env::var(ENV_LOG)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.filter.clone());

    EnvFilter::try_new(&directive).map_err(|err| {
        GenericError::parse(format!("Invalid log filter “{directive}”: {err}"))
    })
}

/// Install a global `fmt` subscriber
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing changes.
///
/// # Errors
/// Returns a parse error when the filter directive is invalid.
pub fn init_tracing(config: &LoggingConfig) -> KitResult<bool> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!(filter = %config.filter, json = config.json, "Tracing initialized");
    }
    Ok(installed)
}
