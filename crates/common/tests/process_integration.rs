//! Integration tests for process, file system, URL and sync helpers
//!
//! Process tests rely on POSIX tools (`sh`, `printf`, `true`, `false`) and
//! are skipped on other platforms.

use std::thread;
use std::time::Duration;

use foundationkit_common::error::ErrorDomain;
use foundationkit_common::fs::{autocleaned_temporary_directory, directory_exists, write_temporary_file};
use foundationkit_common::process::{command, find_executable, CommandExt};
use foundationkit_common::sync::{returning_wait, throwing_wait};
use foundationkit_common::url::{load_data, UrlExt};
use foundationkit_common::{GenericError, KitConfig};
use url::Url;

#[cfg(unix)]
#[test]
fn test_command_output_round_trip_through_temp_file() {
    let path = write_temporary_file("line one\nline two\n", Some("input"), Some("txt")).unwrap();

    let output = command("sh", ["-c", "cat \"$0\" | wc -l"])
        .unwrap()
        .arg(&path)
        .run_and_get_output_string()
        .unwrap();
    assert_eq!(output.trim(), "2");

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[cfg(unix)]
#[test]
fn test_find_executable_on_path() {
    let sh = find_executable("sh").unwrap();
    assert!(sh.is_absolute());
    assert!(find_executable("definitely-not-installed-fk").is_none());
}

/// Validates a failing process surfaces its exit status through the wait
/// bridge.
#[cfg(unix)]
#[test]
fn test_process_failure_through_wait_bridge() {
    let err = throwing_wait(|completion| {
        thread::spawn(move || {
            let result = command("sh", ["-c", "exit 5"]).and_then(|mut cmd| cmd.run_and_wait());
            completion.complete(result.err());
        });
    })
    .unwrap_err();

    assert_eq!(err.domain(), ErrorDomain::Process);
    assert_eq!(err.code(), Some(5));
}

#[test]
fn test_wait_bridge_returns_value_from_worker() {
    let total: u64 = returning_wait(|completion| {
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            completion.succeed((1..=10).sum());
        });
    })
    .unwrap();
    assert_eq!(total, 55);

    let err = returning_wait(|completion: foundationkit_common::sync::Completion<()>| {
        completion.fail(GenericError::url("offline"));
    })
    .unwrap_err();
    assert_eq!(err.description(), "offline");
}

#[test]
fn test_load_data_from_file_url() {
    let path = write_temporary_file([0xCAu8, 0xFE], None, Some("bin")).unwrap();
    let directory = Url::from_directory_path(path.parent().unwrap()).unwrap();
    let url = directory.appending_path_components([path.file_name().unwrap().to_string_lossy()]);

    assert_eq!(load_data(&url).unwrap(), vec![0xCA, 0xFE]);
    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn test_autocleaned_directory_from_toml_config() {
    let name = format!("FoundationKitIntegration-{}", std::process::id());
    let config = KitConfig::from_toml_str(&format!("temporary_directory_name = \"{name}\"")).unwrap();

    let directory = autocleaned_temporary_directory(&config).unwrap();
    assert!(directory_exists(&directory));
    std::fs::remove_dir_all(std::env::temp_dir().join(name)).unwrap();
}
