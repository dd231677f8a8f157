//! File system helpers
//!
//! Existence checks never fail: a path that cannot be inspected is reported
//! as missing. Helpers that create or remove items return [`KitResult`].
//!
//! ## Autocleaned temporary directory
//!
//! [`autocleaned_temporary_directory`] returns
//! `<system temp>/<temporary_directory_name>/<process name>`. The first call
//! in a process for a given location wipes whatever a previous run left
//! there; later calls in the same process only make sure the directory
//! exists.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::KitConfig;
use crate::error::{GenericError, KitResult};

/// Whether anything (file, directory or symlink target) exists at `path`
#[must_use]
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Whether a directory exists at `path`
#[must_use]
pub fn directory_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// Whether something other than a directory exists at `path`
#[must_use]
pub fn non_directory_file_exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.exists() && !path.is_dir()
}

/// Whether `path` is a regular file the current user may execute
#[cfg(unix)]
#[must_use]
pub fn is_executable_file(path: impl AsRef<Path>) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path.as_ref())
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Whether `path` is a regular file the current user may execute
///
/// Windows has no execute bit; executability comes from the extension,
/// which [`find_executable`](crate::process::find_executable) checks.
#[cfg(not(unix))]
#[must_use]
pub fn is_executable_file(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// The process working directory
///
/// # Errors
/// Returns a file system error when the working directory was removed or is
/// not accessible.
pub fn current_directory() -> KitResult<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Home directory of the current user
#[must_use]
pub fn real_home_directory() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Point the symbolic link at `link` to `destination`, replacing whatever
/// is at `link`
///
/// # Errors
/// Returns a file system error when the link cannot be created.
pub fn replace_symbolic_link(link: impl AsRef<Path>, destination: impl AsRef<Path>) -> KitResult<()> {
    let link = link.as_ref();
    let destination = destination.as_ref();

    if let Ok(metadata) = std::fs::symlink_metadata(link) {
        let removed = if metadata.is_dir() {
            std::fs::remove_dir_all(link)
        } else {
            std::fs::remove_file(link)
        };
        if let Err(err) = removed {
            debug!(link = %link.display(), error = %err, "Could not remove existing item");
        }
    }

    create_symbolic_link(link, destination)?;
    debug!(link = %link.display(), destination = %destination.display(), "Symbolic link replaced");
    Ok(())
}

#[cfg(unix)]
fn create_symbolic_link(link: &Path, destination: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(destination, link)
}

#[cfg(windows)]
fn create_symbolic_link(link: &Path, destination: &Path) -> std::io::Result<()> {
    if destination.is_dir() {
        std::os::windows::fs::symlink_dir(destination, link)
    } else {
        std::os::windows::fs::symlink_file(destination, link)
    }
}

#[cfg(not(any(unix, windows)))]
fn create_symbolic_link(_link: &Path, _destination: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(std::io::ErrorKind::Unsupported, "symbolic links are not supported"))
}

/// A fresh path inside a new random directory under the system temporary
/// directory
///
/// The directory is created; the file is not. `filename` defaults to a
/// random UUID and `extension` is appended when given.
///
/// # Errors
/// Returns a file system error when the random directory cannot be created.
pub fn temporary_random_file_path(filename: Option<&str>, extension: Option<&str>) -> KitResult<PathBuf> {
    let directory = std::env::temp_dir().join(Uuid::new_v4().to_string().to_uppercase());
    std::fs::create_dir_all(&directory)?;

    let filename = filename.map_or_else(|| Uuid::new_v4().to_string().to_uppercase(), str::to_string);
    let filename = match extension {
        Some(extension) => format!("{filename}.{extension}"),
        None => filename,
    };
    Ok(directory.join(filename))
}

/// Write `bytes` to a new file from [`temporary_random_file_path`]
///
/// # Errors
/// Returns a file system error when the directory or file cannot be
/// written.
pub fn write_temporary_file(
    bytes: impl AsRef<[u8]>,
    filename: Option<&str>,
    extension: Option<&str>,
) -> KitResult<PathBuf> {
    let path = temporary_random_file_path(filename, extension)?;
    std::fs::write(&path, bytes.as_ref())?;
    debug!(path = %path.display(), bytes = bytes.as_ref().len(), "Temporary file written");
    Ok(path)
}

/// Locations already cleaned by this process
static CLEANED_DIRECTORIES: Lazy<Mutex<HashSet<PathBuf>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Name of the running executable, used to separate processes
#[must_use]
pub fn process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "process".to_string())
}

/// Per-process scratch directory, wiped on first use in each process
///
/// # Errors
/// Returns a parse error for an invalid configuration or a file system
/// error when the directory cannot be created.
pub fn autocleaned_temporary_directory(config: &KitConfig) -> KitResult<PathBuf> {
    config.validate()?;
    let directory = std::env::temp_dir().join(&config.temporary_directory_name).join(process_name());
    prepare_autocleaned_directory(&directory)?;
    Ok(directory)
}

/// Clean `directory` if this process has not done so yet, then create it
pub(crate) fn prepare_autocleaned_directory(directory: &Path) -> KitResult<()> {
    {
        let mut cleaned = CLEANED_DIRECTORIES.lock();
        if cleaned.insert(directory.to_path_buf()) && directory.exists() {
            match std::fs::remove_dir_all(directory) {
                Ok(()) => debug!(directory = %directory.display(), "Autocleaned temporary directory"),
                Err(err) => {
                    warn!(directory = %directory.display(), error = %err, "Could not clean temporary directory");
                }
            }
        }
    }

    std::fs::create_dir_all(directory).map_err(|err| {
        GenericError::file_system(format!(
            "Could not create temporary directory “{}”: {err}",
            directory.display()
        ))
    })
}
