//! URL helpers: path building, loading, HTTP status checks and opening
//! targets with the platform opener
//!
//! Opening is best effort. The opener is `xdg-open` on Linux and other
//! Unix systems, `open` on macOS and `cmd /C start` on Windows, unless
//! [`KitConfig::open_command`] names another program. Any failure is
//! reported as "Error opening URL “…”." with the underlying failure as the
//! recovery suggestion.
//!
//! [`load_data`] and the opener block the current thread; do not call them
//! from inside an async runtime.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use ::url::Url;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::KitConfig;
use crate::error::{GenericError, KitResult};
use crate::process::{find_executable_with, CommandExt};

/// Schemes the platform opener is expected to handle
pub const SUPPORTED_SCHEMES: [&str; 4] = ["file", "http", "https", "mailto"];

/// Path building on [`Url`]
pub trait UrlExt {
    /// The URL with every component appended to its path in order
    ///
    /// Components containing `/` contribute one segment per piece. URLs
    /// that cannot carry a path (`mailto:`, `data:`) are returned unchanged.
    fn appending_path_components<I, S>(&self, components: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// Append every component to the path in place
    fn append_path_components<I, S>(&mut self, components: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// Whether the scheme is one the platform opener handles
    fn is_supported(&self) -> bool;
}

impl UrlExt for Url {
    fn appending_path_components<I, S>(&self, components: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.clone();
        url.append_path_components(components);
        url
    }

    fn append_path_components<I, S>(&mut self, components: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.cannot_be_a_base() {
            debug!(url = %self, "URL cannot carry path components");
            return;
        }
        if let Ok(mut segments) = self.path_segments_mut() {
            segments.pop_if_empty();
            for component in components {
                segments.extend(component.as_ref().split('/').filter(|piece| !piece.is_empty()));
            }
        }
    }

    fn is_supported(&self) -> bool {
        SUPPORTED_SCHEMES.contains(&self.scheme())
    }
}

/// Fail unless `status` is informational, successful or a redirect
/// (100..400)
///
/// # Errors
/// Returns a URL error "Request failed with HTTP status N “Reason”." with
/// the status as code.
pub fn enforce_http_status(status: u16) -> KitResult<()> {
    if (100..400).contains(&status) {
        return Ok(());
    }

    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    Err(GenericError::url(format!("Request failed with HTTP status {status} “{reason}”."))
        .with_code(status))
}

/// Contents of a `file:` or `http(s):` URL
///
/// # Errors
/// Returns a file system error for unreadable files, a URL error for
/// network failures and rejected HTTP statuses, and a URL error for other
/// schemes.
pub fn load_data(url: &Url) -> KitResult<Vec<u8>> {
    debug!(url = %url, "Loading data");
    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| GenericError::url(format!("Invalid file URL “{url}”.")))?;
            Ok(std::fs::read(path)?)
        }
        "http" | "https" => {
            let response = reqwest::blocking::get(url.clone())?;
            enforce_http_status(response.status().as_u16())?;
            Ok(response.bytes()?.to_vec())
        }
        scheme => Err(GenericError::url(format!("Unsupported URL scheme “{scheme}”."))),
    }
}

/// Program and leading arguments used to open targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opener {
    program: OsString,
    arguments: Vec<String>,
}

impl Opener {
    /// The opener for this platform, or the configured override
    ///
    /// # Errors
    /// Returns a process error when the opener executable cannot be found.
    pub fn resolve(config: &KitConfig) -> KitResult<Self> {
        let (name, arguments) = match config.open_command.as_deref() {
            Some(command) => (command.to_string(), Vec::new()),
            None => platform_opener(),
        };

        if Path::new(&name).components().count() > 1 {
            return Ok(Self { program: name.into(), arguments });
        }

        let program = find_executable_with(&name, config).ok_or_else(|| {
            GenericError::process(format!("Executable “{name}” not found."))
        })?;
        Ok(Self { program: program.into_os_string(), arguments })
    }

    /// Program that will be run
    #[must_use]
    pub fn program(&self) -> &std::ffi::OsStr {
        &self.program
    }

    fn command_for(&self, target: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.arguments).arg(target).stdout(Stdio::null()).stderr(Stdio::null());
        command
    }
}

#[cfg(target_os = "macos")]
fn platform_opener() -> (String, Vec<String>) {
    ("open".to_string(), Vec::new())
}

#[cfg(windows)]
fn platform_opener() -> (String, Vec<String>) {
    ("cmd".to_string(), vec!["/C".to_string(), "start".to_string(), String::new()])
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_opener() -> (String, Vec<String>) {
    ("xdg-open".to_string(), Vec::new())
}

fn opening_failure(target: &str, cause: &GenericError) -> GenericError {
    let failure = GenericError::url(format!("Error opening URL “{target}”."))
        .with_recovery_suggestion(cause.description());
    match cause.code() {
        Some(code) => failure.with_code(code),
        None => failure,
    }
}

/// Open a URL or path string with the platform opener
///
/// # Errors
/// Returns a URL error "Error opening URL “target”." when the opener is
/// missing or reports failure.
pub fn open(target: &str, config: &KitConfig) -> KitResult<()> {
    debug!(target = %target, "Opening target");
    Opener::resolve(config)
        .and_then(|opener| opener.command_for(target).run_and_wait())
        .map_err(|cause| {
            warn!(target = %target, error = %cause, "Opening target failed");
            opening_failure(target, &cause)
        })
}

/// Open a URL with the platform opener
///
/// # Errors
/// Same as [`open`].
pub fn open_url(url: &Url, config: &KitConfig) -> KitResult<()> {
    open(url.as_str(), config)
}

/// Open a file or directory with the platform opener
///
/// # Errors
/// Same as [`open`].
pub fn open_path(path: impl AsRef<Path>, config: &KitConfig) -> KitResult<()> {
    open(&path.as_ref().to_string_lossy(), config)
}

/// Open every target, then report the last failure, if any
///
/// A failure does not stop the remaining targets from being tried.
///
/// # Errors
/// Returns the error of the last target that failed to open.
pub fn open_all<I, S>(targets: I, config: &KitConfig) -> KitResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut last_error = None;
    for target in targets {
        if let Err(err) = open(target.as_ref(), config) {
            last_error = Some(err);
        }
    }
    last_error.map_or(Ok(()), Err)
}
