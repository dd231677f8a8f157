//! Integration tests for settings stores
//!
//! Several typed settings share scoped views of one file-backed store.

use std::sync::Arc;
use std::thread;

use foundationkit_common::settings::{JsonFileStore, KeyValueStore, MemoryStore, ScopedStore, Setting};
use foundationkit_common::AppVersion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Theme {
    Light,
    Dark,
}

/// Validates typed settings survive reopening the backing file.
///
/// Assertions:
/// - Values written through scoped settings are read back after reopening.
/// - Scopes keep equally named keys apart.
/// - Removed settings read as their default again.
#[test]
fn test_scoped_settings_persist() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&path)?);
        let app: Arc<dyn KeyValueStore> = Arc::new(ScopedStore::new("com.example.app", store.clone()));
        let widget: Arc<dyn KeyValueStore> = Arc::new(ScopedStore::new("com.example.widget", store));

        Setting::new("theme", app.clone(), Theme::Light).set(&Theme::Dark)?;
        Setting::new("theme", widget, Theme::Light).set(&Theme::Light)?;
        Setting::new("lastVersion", app, AppVersion::default())
            .set(&"2.1".parse::<AppVersion>()?)?;
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&path)?);
    let app: Arc<dyn KeyValueStore> = Arc::new(ScopedStore::new("com.example.app", store.clone()));

    let theme = Setting::new("theme", app.clone(), Theme::Light);
    assert_eq!(theme.get(), Theme::Dark);
    assert_eq!(store.get("com.example.widget.theme"), Some(serde_json::json!("Light")));

    let version = Setting::new("lastVersion", app, AppVersion::default());
    assert_eq!(version.get(), AppVersion::new(2, 1, 0));

    theme.remove()?;
    assert_eq!(theme.get(), Theme::Light);
    assert!(!theme.is_set());
    Ok(())
}

#[test]
fn test_memory_store_shared_between_threads() {
    let store = Arc::new(MemoryStore::new());

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let store: Arc<dyn KeyValueStore> = store.clone();
            thread::spawn(move || {
                Setting::new(format!("worker.{index}"), store, 0u32).set(&(index * 10)).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 8);
    assert_eq!(store.get("worker.3"), Some(serde_json::json!(30)));
}
