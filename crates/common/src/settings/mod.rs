//! Key/value settings storage
//!
//! - **[`KeyValueStore`]**: the storage seam; values are JSON documents
//! - **[`MemoryStore`]**: process-local store
//! - **[`JsonFileStore`]**: store persisted as a single JSON object on disk
//! - **[`ScopedStore`]**: prefixes every key, so several components can
//!   share one backing store without collisions
//! - **[`Setting`]**: typed accessor for one key with a default value
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use foundationkit_common::settings::{KeyValueStore, MemoryStore, Setting};
//!
//! let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
//! let launches = Setting::new("launchCount", store, 0u32);
//!
//! assert_eq!(launches.get(), 0);
//! launches.set(&(launches.get() + 1)).unwrap();
//! assert_eq!(launches.get(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{GenericError, KitResult};

/// File name used by [`JsonFileStore::for_identifier`]
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Storage seam for settings
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns a settings error when the value cannot be persisted.
    fn set(&self, key: &str, value: Value) -> KitResult<()>;

    /// Remove `key`; removing a missing key succeeds
    ///
    /// # Errors
    /// Returns a settings error when the removal cannot be persisted.
    fn remove(&self, key: &str) -> KitResult<()>;

    /// Whether a value is stored under `key`
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory store, cleared when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Every stored key, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> KitResult<()> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> KitResult<()> {
        self.values.write().remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }
}

/// Store persisted as one JSON object
///
/// The file is read once when opened and rewritten after every change. A
/// change is written to a sibling temporary file first and then renamed
/// over the document, so readers never see a partial file.
pub struct JsonFileStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .field("keys", &self.values.read().len())
            .finish()
    }
}

impl JsonFileStore {
    /// Open the document at `path`; a missing or empty file is an empty
    /// store
    ///
    /// # Errors
    /// Returns a settings error when the file exists but is not a JSON
    /// object.
    pub fn open(path: impl Into<PathBuf>) -> KitResult<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => match serde_json::from_str::<Value>(&text)? {
                Value::Object(map) => map,
                _ => {
                    return Err(GenericError::settings(format!(
                        "Settings file “{}” does not contain a JSON object.",
                        path.display()
                    )))
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(path = %path.display(), keys = values.len(), "Opened settings file");
        Ok(Self { path, values: RwLock::new(values) })
    }

    /// Store for the application or suite `identifier` in the user
    /// configuration directory (`<config dir>/<identifier>/settings.json`)
    ///
    /// # Errors
    /// Returns a settings error when the platform has no configuration
    /// directory or the identifier is not a plain name, otherwise the errors
    /// of [`JsonFileStore::open`].
    pub fn for_identifier(identifier: &str) -> KitResult<Self> {
        if identifier.is_empty() || identifier.contains(['/', '\\']) || identifier == ".." {
            return Err(GenericError::settings(format!("Invalid settings identifier “{identifier}”.")));
        }
        let config_dir = dirs::config_dir().ok_or_else(|| {
            GenericError::settings("No user configuration directory is available on this platform.")
        })?;
        Self::open(config_dir.join(identifier).join(SETTINGS_FILE_NAME))
    }

    /// Location of the document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &Map<String, Value>) -> KitResult<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let text = serde_json::to_string_pretty(values)?;
        let staging = self.path.with_extension("json.tmp");
        let saved = std::fs::write(&staging, text).and_then(|()| std::fs::rename(&staging, &self.path));
        saved.map_err(|err| {
            // Best effort; the staging path may not be a file at all.
            let _ = std::fs::remove_file(&staging);
            warn!(path = %self.path.display(), error = %err, "Could not replace settings file");
            GenericError::settings(format!("Could not save settings to “{}”: {err}", self.path.display()))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> KitResult<()> {
        let mut values = self.values.write();
        let mut updated = values.clone();
        updated.insert(key.to_string(), value);
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> KitResult<()> {
        let mut values = self.values.write();
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut updated = values.clone();
        updated.remove(key);
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }
}

/// Store that prefixes every key with `<scope>.`
#[derive(Clone)]
pub struct ScopedStore {
    scope: String,
    inner: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for ScopedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedStore").field("scope", &self.scope).finish_non_exhaustive()
    }
}

impl ScopedStore {
    /// Store writing `<scope>.<key>` into `inner`
    pub fn new(scope: impl Into<String>, inner: Arc<dyn KeyValueStore>) -> Self {
        Self { scope: scope.into(), inner }
    }

    /// Prefix applied to every key
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn scoped_key(&self, key: &str) -> String {
        format!("{}.{}", self.scope, key)
    }
}

impl KeyValueStore for ScopedStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(&self.scoped_key(key))
    }

    fn set(&self, key: &str, value: Value) -> KitResult<()> {
        self.inner.set(&self.scoped_key(key), value)
    }

    fn remove(&self, key: &str) -> KitResult<()> {
        self.inner.remove(&self.scoped_key(key))
    }

    fn contains(&self, key: &str) -> bool {
        self.inner.contains(&self.scoped_key(key))
    }
}

/// Typed accessor for one key of a [`KeyValueStore`]
///
/// Reads decode the stored JSON into `T`. A missing value, or one that does
/// not decode as `T`, reads as the default.
pub struct Setting<T> {
    key: String,
    store: Arc<dyn KeyValueStore>,
    default: T,
    _marker: PhantomData<fn() -> T>,
}

impl<T: fmt::Debug> fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting").field("key", &self.key).field("default", &self.default).finish()
    }
}

impl<T> Setting<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Accessor for `key` in `store`, reading as `default` when unset
    pub fn new(key: impl Into<String>, store: Arc<dyn KeyValueStore>, default: T) -> Self {
        Self { key: key.into(), store, default, _marker: PhantomData }
    }

    /// Key in the store
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value returned when nothing usable is stored
    #[must_use]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Stored value decoded as `T`, or the default
    #[must_use]
    pub fn get(&self) -> T {
        self.try_get().unwrap_or_else(|| self.default.clone())
    }

    /// Stored value decoded as `T`, `None` when absent or undecodable
    #[must_use]
    pub fn try_get(&self) -> Option<T> {
        let value = self.store.get(&self.key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                debug!(key = %self.key, error = %err, "Stored setting does not decode, using default");
                None
            }
        }
    }

    /// Store `value`
    ///
    /// # Errors
    /// Returns a serialization error when `value` cannot be encoded as JSON,
    /// otherwise the store's error.
    pub fn set(&self, value: &T) -> KitResult<()> {
        let encoded = serde_json::to_value(value)?;
        self.store.set(&self.key, encoded)
    }

    /// Remove the stored value so reads return the default again
    ///
    /// # Errors
    /// Returns the store's error.
    pub fn remove(&self) -> KitResult<()> {
        self.store.remove(&self.key)
    }

    /// Whether a value is stored, decodable or not
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.store.contains(&self.key)
    }
}
