//! Executable lookup and child process helpers
//!
//! - **Lookup**: [`find_executable`] walks the `PATH` directories (plus any
//!   configured extras) trying each executable extension
//! - **Execution**: [`CommandExt`] runs a [`Command`] to completion and turns
//!   a non-zero exit status into a [`GenericError`] carrying the code
//!
//! ## Usage
//!
//! ```rust,no_run
//! use foundationkit_common::process::{command, CommandExt};
//!
//! let revision = command("git", ["rev-parse", "HEAD"])?.run_and_get_output_string()?;
//! println!("{revision}");
//! # Ok::<(), foundationkit_common::error::GenericError>(())
//! ```

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::KitConfig;
use crate::error::{GenericError, KitResult};
use crate::fs::{is_executable_file, non_directory_file_exists};

#[cfg(windows)]
const DEFAULT_EXECUTABLE_EXTENSIONS: &[&str] = &["com", "exe", "bat", "cmd"];

/// Value of an environment variable, matching the name case-insensitively
#[must_use]
pub fn environment_value(name: &str) -> Option<OsString> {
    std::env::var_os(name).or_else(|| {
        std::env::vars_os()
            .find(|(key, _)| key.to_string_lossy().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// Directories listed in `PATH`, in order
#[must_use]
pub fn executable_directories() -> Vec<PathBuf> {
    environment_value("PATH")
        .map(|path| std::env::split_paths(&path).filter(|dir| !dir.as_os_str().is_empty()).collect())
        .unwrap_or_default()
}

/// Extensions tried when looking up an executable
///
/// On Windows these come from `PATHEXT` (lowercased, without dots); other
/// platforms only try the bare name.
#[must_use]
pub fn executable_extensions() -> Vec<String> {
    #[cfg(windows)]
    {
        match environment_value("PATHEXT") {
            Some(pathext) => pathext
                .to_string_lossy()
                .split(';')
                .map(|ext| ext.trim_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
            None => DEFAULT_EXECUTABLE_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
        }
    }
    #[cfg(not(windows))]
    {
        vec![String::new()]
    }
}

/// First executable named `name` in `directories`
///
/// Every directory is tried with every extension in
/// [`executable_extensions`] before moving on to the next directory.
#[must_use]
pub fn find_executable_in<I>(name: &str, directories: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let extensions = executable_extensions();
    directories.into_iter().find_map(|directory| {
        extensions.iter().find_map(|extension| {
            let candidate = if extension.is_empty() {
                directory.join(name)
            } else {
                directory.join(format!("{name}.{extension}"))
            };
            (non_directory_file_exists(&candidate) && is_executable_file(&candidate)).then_some(candidate)
        })
    })
}

/// First executable named `name` on `PATH`
#[must_use]
pub fn find_executable(name: &str) -> Option<PathBuf> {
    find_executable_in(name, executable_directories())
}

/// First executable named `name` on `PATH` or in the configured extra
/// directories
#[must_use]
pub fn find_executable_with(name: &str, config: &KitConfig) -> Option<PathBuf> {
    let directories = executable_directories()
        .into_iter()
        .chain(config.extra_executable_directories.iter().cloned());
    find_executable_in(name, directories)
}

fn not_found(name: &str) -> GenericError {
    GenericError::process(format!("Executable “{name}” not found."))
        .with_recovery_suggestion("Install it or add its directory to PATH.")
}

/// A [`Command`] for the executable named `name`, resolved on `PATH`
///
/// # Errors
/// Returns a process error "Executable “name” not found." when the lookup
/// fails.
pub fn command<I, S>(name: &str, arguments: I) -> KitResult<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let executable = find_executable(name).ok_or_else(|| not_found(name))?;
    let mut command = Command::new(executable);
    command.args(arguments);
    Ok(command)
}

/// Like [`command`], also searching the configured extra directories
///
/// # Errors
/// Returns a process error when the lookup fails.
pub fn command_with<I, S>(name: &str, arguments: I, config: &KitConfig) -> KitResult<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let executable = find_executable_with(name, config).ok_or_else(|| not_found(name))?;
    let mut command = Command::new(executable);
    command.args(arguments);
    Ok(command)
}

fn termination_error(code: Option<i32>) -> GenericError {
    // Killed by a signal: no exit code, report -1.
    let code = code.unwrap_or(-1);
    GenericError::process(format!("Process terminated with failure (termination status code: {code})"))
        .with_code(code)
}

fn launch_error(command: &Command, err: &std::io::Error) -> GenericError {
    let program = command.get_program().to_string_lossy().into_owned();
    let generic = GenericError::process(format!("Error launching “{program}”: {err}"));
    match err.raw_os_error() {
        Some(code) => generic.with_code(code),
        None => generic,
    }
}

/// Run-to-completion helpers on [`Command`]
pub trait CommandExt {
    /// Run with inherited standard streams and wait for exit
    ///
    /// # Errors
    /// Returns a process error when launching fails or the exit status is
    /// non-zero; the error code is the exit status.
    fn run_and_wait(&mut self) -> KitResult<()>;

    /// Run, capturing standard output, and wait for exit
    ///
    /// # Errors
    /// Same as [`CommandExt::run_and_wait`].
    fn run_and_get_output_data(&mut self) -> KitResult<Vec<u8>>;

    /// Run and return standard output as UTF-8 with surrounding newlines
    /// trimmed
    ///
    /// # Errors
    /// Same as [`CommandExt::run_and_wait`], plus a process error when the
    /// output is not valid UTF-8.
    fn run_and_get_output_string(&mut self) -> KitResult<String>;
}

impl CommandExt for Command {
    fn run_and_wait(&mut self) -> KitResult<()> {
        debug!(program = ?self.get_program(), "Running process");
        let status = self.status().map_err(|err| launch_error(self, &err))?;
        if !status.success() {
            debug!(program = ?self.get_program(), status = ?status.code(), "Process failed");
            return Err(termination_error(status.code()));
        }
        Ok(())
    }

    fn run_and_get_output_data(&mut self) -> KitResult<Vec<u8>> {
        debug!(program = ?self.get_program(), "Running process with captured output");
        let output = self
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|err| launch_error(self, &err))?;

        if !output.status.success() {
            debug!(
                program = ?self.get_program(),
                status = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Process failed"
            );
            return Err(termination_error(output.status.code()));
        }
        Ok(output.stdout)
    }

    fn run_and_get_output_string(&mut self) -> KitResult<String> {
        let data = self.run_and_get_output_data()?;
        let text = String::from_utf8(data)
            .map_err(|_| GenericError::process("Process output is not a decodable string."))?;
        Ok(text.trim_matches(|c| c == '\n' || c == '\r').to_string())
    }
}

/// Terminate every process named `name` with `killall`
///
/// # Errors
/// Returns a process error when `killall` is missing or reports failure
/// (for example when no process matched).
pub fn kill_process(name: &str) -> KitResult<()> {
    debug!(name = %name, "Killing processes");
    command("killall", [name])?.run_and_wait()
}

#[cfg(test)]
mod tests {
    //! Unit tests for executable lookup and process execution

    use super::*;
    use crate::error::ErrorDomain;

    #[test]
    fn test_executable_extensions_default() {
        let extensions = executable_extensions();
        assert!(!extensions.is_empty());
        #[cfg(not(windows))]
        assert_eq!(extensions, vec![String::new()]);
    }

    #[test]
    fn test_environment_value_case_insensitive() {
        assert!(environment_value("PATH").is_some());
        assert_eq!(environment_value("path"), environment_value("PATH"));
        assert!(environment_value("FOUNDATIONKIT_SURELY_UNSET_VARIABLE").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_executable_in_directories() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("fk-tool");
        std::fs::write(&tool, b"#!/bin/sh\necho hi\n").unwrap();

        assert_eq!(find_executable_in("fk-tool", vec![dir.path().to_path_buf()]), None);

        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(find_executable_in("fk-tool", vec![dir.path().to_path_buf()]), Some(tool.clone()));

        let config = KitConfig::default().with_executable_directory(dir.path());
        assert_eq!(find_executable_with("fk-tool", &config), Some(tool));
    }

    /// Validates directories named like the executable are skipped.
    #[cfg(unix)]
    #[test]
    fn test_find_executable_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("fk-dir")).unwrap();
        assert_eq!(find_executable_in("fk-dir", vec![dir.path().to_path_buf()]), None);
    }

    #[test]
    fn test_command_not_found() {
        let err = command("definitely-not-an-executable-fk", ["--help"]).unwrap_err();
        assert_eq!(err.domain(), ErrorDomain::Process);
        assert_eq!(err.to_string(), "Executable “definitely-not-an-executable-fk” not found.");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_and_get_output_string_trims_newlines() {
        let output = command("printf", ["\\nhello\\n\\n"]).unwrap().run_and_get_output_string().unwrap();
        assert_eq!(output, "hello");
    }

    /// Validates a non-zero exit surfaces the status code.
    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_status() {
        let err = command("sh", ["-c", "exit 3"]).unwrap().run_and_wait().unwrap_err();
        assert_eq!(err.code(), Some(3));
        assert_eq!(err.to_string(), "Process terminated with failure (termination status code: 3)");

        let err = command("sh", ["-c", "echo out; exit 4"]).unwrap().run_and_get_output_data().unwrap_err();
        assert_eq!(err.code(), Some(4));
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_utf8_output() {
        let err = command("printf", ["\\377"]).unwrap().run_and_get_output_string().unwrap_err();
        assert_eq!(err.to_string(), "Process output is not a decodable string.");
    }
}
