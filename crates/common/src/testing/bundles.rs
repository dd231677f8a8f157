//! Bundle directory builders
//!
//! [`BundleFixture`] lays out bundles inside a temporary directory that is
//! removed when the fixture is dropped.
//!
//! ```
//! use foundationkit_common::testing::bundles::BundleFixture;
//! use foundationkit_common::testing::fixtures::application_info;
//!
//! let fixture = BundleFixture::new().unwrap();
//! let app = fixture.bundle("Tool.app", &application_info("Tool", "com.example.tool")).unwrap();
//! assert_eq!(app.bundle_name(), "Tool");
//! ```

#![allow(clippy::missing_errors_doc)]

use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use crate::bundle::{Bundle, INFO_FILE_NAME};
use crate::error::KitResult;

/// Temporary directory holding test bundles
#[derive(Debug)]
pub struct BundleFixture {
    root: TempDir,
}

impl BundleFixture {
    /// Fixture in a fresh temporary directory
    ///
    /// # Errors
    /// Returns a file system error when the directory cannot be created.
    pub fn new() -> KitResult<Self> {
        Ok(Self { root: tempfile::tempdir()? })
    }

    /// Directory the bundles are created in
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Create `relative` with `Contents/Info.json` holding `info`
    pub fn create(&self, relative: impl AsRef<Path>, info: &Value) -> KitResult<PathBuf> {
        let path = self.root.path().join(relative);
        let contents = path.join("Contents");
        std::fs::create_dir_all(&contents)?;
        std::fs::write(contents.join(INFO_FILE_NAME), serde_json::to_string_pretty(info)?)?;
        Ok(path)
    }

    /// Create and load a bundle
    pub fn bundle(&self, relative: impl AsRef<Path>, info: &Value) -> KitResult<Bundle> {
        Bundle::load(self.create(relative, info)?)
    }

    /// Write a resource file under `<bundle>/Contents/Resources`
    pub fn add_resource(
        &self,
        bundle: impl AsRef<Path>,
        file_name: &str,
        contents: impl AsRef<[u8]>,
    ) -> KitResult<PathBuf> {
        let resources = self.root.path().join(bundle).join("Contents").join("Resources");
        std::fs::create_dir_all(&resources)?;
        let path = resources.join(file_name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{application_extension_info, application_info};

    #[test]
    fn test_fixture_builds_loadable_bundles() {
        let fixture = BundleFixture::new().unwrap();
        let app = fixture.bundle("Host.app", &application_info("Host", "com.example.host")).unwrap();
        assert!(app.is_application());
        assert_eq!(app.display_name_with_version(), "Host 1.0 (1)");

        fixture
            .create("Host.app/Contents/PlugIns/Share.appex", &application_extension_info("com.example.share", "share"))
            .unwrap();
        let host = Bundle::load(fixture.root().join("Host.app")).unwrap();
        assert_eq!(host.built_in_application_extension_bundles().len(), 1);

        let resource = fixture.add_resource("Host.app", "readme.txt", "hello").unwrap();
        assert_eq!(host.load_resource_file("readme", None, "txt").unwrap(), resource);
    }

    #[test]
    fn test_fixture_removed_on_drop() {
        let fixture = BundleFixture::new().unwrap();
        let root = fixture.root().to_path_buf();
        drop(fixture);
        assert!(!root.exists());
    }
}
