//! Application, plug-in and extension bundles on disk
//!
//! A bundle is a directory whose information dictionary lives in
//! `Info.json`, either under `Contents/` (macOS layout) or at the bundle
//! root (flat layout). The dictionary uses the usual bundle keys
//! (`CFBundleIdentifier`, `CFBundleName`, `CFBundleVersion`, ...). Bundle
//! kind comes from the directory extension: `.app` applications, `.bundle`
//! plug-ins and `.appex` application extensions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use foundationkit_common::bundle::Bundle;
//!
//! let bundle = Bundle::load("/Applications/Example.app")?;
//! println!("{}", bundle.display_name_with_version());
//! for extension in bundle.built_in_application_extension_bundles() {
//!     println!("  {}", extension.bundle_name());
//! }
//! # Ok::<(), foundationkit_common::error::GenericError>(())
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use ::url::Url;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::KitConfig;
use crate::error::{GenericError, KitResult};
use crate::text::StrExt;

/// Name of the information dictionary file
pub const INFO_FILE_NAME: &str = "Info.json";

/// Directory extension of applications
pub const APPLICATION_EXTENSION: &str = "app";
/// Directory extension of loadable plug-in bundles
pub const PLUGIN_BUNDLE_EXTENSION: &str = "bundle";
/// Directory extension of application extensions
pub const APPLICATION_EXTENSION_BUNDLE_EXTENSION: &str = "appex";

const CONTENTS_DIRECTORY: &str = "Contents";
const EXECUTABLE_DIRECTORY: &str = "MacOS";
const RESOURCES_DIRECTORY: &str = "Resources";
const PLUGINS_DIRECTORY: &str = "PlugIns";
const EXTENSIONS_DIRECTORY: &str = "Extensions";

const IDENTIFIER_KEY: &str = "CFBundleIdentifier";
const NAME_KEY: &str = "CFBundleName";
const DISPLAY_NAME_KEY: &str = "CFBundleDisplayName";
const EXECUTABLE_KEY: &str = "CFBundleExecutable";
const VERSION_KEY: &str = "CFBundleVersion";
const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
const PRINCIPAL_CLASS_KEY: &str = "NSPrincipalClass";
const DESCRIPTION_KEY: &str = "NSHumanReadableDescription";
const COPYRIGHT_KEY: &str = "NSHumanReadableCopyright";
const EXTENSION_KEY: &str = "NSExtension";
const EXTENSION_POINT_KEY: &str = "NSExtensionPointIdentifier";
const EXTENSION_KIT_KEY: &str = "EXAppExtensionAttributes";
const EXTENSION_KIT_POINT_KEY: &str = "EXExtensionPointIdentifier";

/// Prefix of the library's own information dictionary keys
pub const LINK_KEY_PREFIX: &str = "NSX";
/// Key, after [`LINK_KEY_PREFIX`], of the privacy policy URL
pub const PRIVACY_POLICY_LINK_KEY: &str = "PrivacyPolicyLink";
/// Key, after [`LINK_KEY_PREFIX`], of the terms of use URL
pub const TERMS_OF_USE_LINK_KEY: &str = "TermsOfUseLink";

/// Directory levels searched upwards for a containing application
pub const PARENT_APPLICATION_MAXIMUM_LEVELS: usize = 4;

/// A bundle directory and its information dictionary
#[derive(Debug, Clone)]
pub struct Bundle {
    path: PathBuf,
    contents: PathBuf,
    info: Map<String, Value>,
}

impl Bundle {
    /// Load the bundle at `path`
    ///
    /// A bundle without an information dictionary loads with an empty one.
    ///
    /// # Errors
    /// Returns a bundle error when `path` is not a directory or the
    /// dictionary is not a JSON object, and a serialization error when it is
    /// not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> KitResult<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(GenericError::bundle(format!("Bundle not found at “{}”.", path.display())));
        }

        let nested = path.join(CONTENTS_DIRECTORY);
        let contents = if nested.is_dir() { nested } else { path.to_path_buf() };
        let info_path = contents.join(INFO_FILE_NAME);

        let info = if info_path.is_file() {
            match serde_json::from_str::<Value>(&std::fs::read_to_string(&info_path)?)? {
                Value::Object(map) => map,
                _ => {
                    return Err(GenericError::bundle(format!(
                        "Information dictionary “{}” is not a dictionary.",
                        info_path.display()
                    )))
                }
            }
        } else {
            Map::new()
        };

        debug!(bundle = %path.display(), keys = info.len(), "Bundle loaded");
        Ok(Self { path: path.to_path_buf(), contents, info })
    }

    /// Bundle directory
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole information dictionary
    #[must_use]
    pub fn info_dictionary(&self) -> &Map<String, Value> {
        &self.info
    }

    /// Raw information dictionary entry
    #[must_use]
    pub fn object(&self, key: &str) -> Option<&Value> {
        self.info.get(key)
    }

    fn string(&self, key: &str) -> Option<&str> {
        self.object(key).and_then(Value::as_str)
    }

    fn non_empty_string(&self, key: &str) -> Option<&str> {
        self.string(key).filter(|value| !value.is_empty())
    }

    /// Reverse-DNS identifier (`CFBundleIdentifier`)
    #[must_use]
    pub fn bundle_identifier(&self) -> Option<&str> {
        self.string(IDENTIFIER_KEY)
    }

    /// Executable file, when the dictionary names one
    #[must_use]
    pub fn executable_path(&self) -> Option<PathBuf> {
        let executable = self.non_empty_string(EXECUTABLE_KEY)?;
        let in_macos = self.contents.join(EXECUTABLE_DIRECTORY).join(executable);
        if in_macos.exists() {
            Some(in_macos)
        } else {
            Some(self.contents.join(executable))
        }
    }

    fn executable_name(&self) -> Option<String> {
        self.executable_path()
            .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
    }

    fn directory_name(&self) -> String {
        self.path
            .file_stem()
            .map_or_else(|| self.path.to_string_lossy().into_owned(), |stem| stem.to_string_lossy().into_owned())
    }

    /// Display name, falling back to the bundle name, the executable name and
    /// finally the directory name without extension
    #[must_use]
    pub fn bundle_name(&self) -> String {
        self.string(DISPLAY_NAME_KEY)
            .or_else(|| self.string(NAME_KEY))
            .map(str::to_string)
            .or_else(|| self.executable_name())
            .unwrap_or_else(|| self.directory_name())
    }

    /// Build version; an empty string counts as missing
    #[must_use]
    pub fn bundle_version(&self) -> Option<&str> {
        self.non_empty_string(VERSION_KEY)
    }

    /// Marketing version; an empty string counts as missing
    #[must_use]
    pub fn bundle_short_version(&self) -> Option<&str> {
        self.non_empty_string(SHORT_VERSION_KEY)
    }

    /// Entry class name (`NSPrincipalClass`)
    #[must_use]
    pub fn principal_class(&self) -> Option<&str> {
        self.non_empty_string(PRINCIPAL_CLASS_KEY)
    }

    /// `"Name 1.2 (34)"`, omitting whichever versions are missing
    #[must_use]
    pub fn display_name_with_version(&self) -> String {
        let mut name = self.bundle_name();
        if let Some(short_version) = self.bundle_short_version() {
            name.push(' ');
            name.push_str(short_version);
        }
        if let Some(version) = self.bundle_version() {
            name.push_str(&format!(" ({version})"));
        }
        name
    }

    /// Description shown to users
    #[must_use]
    pub fn human_readable_description(&self) -> Option<&str> {
        self.string(DESCRIPTION_KEY)
    }

    /// Copyright line shown to users
    #[must_use]
    pub fn human_readable_copyright(&self) -> Option<&str> {
        self.string(COPYRIGHT_KEY)
    }

    /// Identifier used for ordering: the bundle identifier, the executable
    /// name or the bundle name
    #[must_use]
    pub fn stable_identifier(&self) -> String {
        self.bundle_identifier()
            .map(str::to_string)
            .or_else(|| self.executable_name())
            .unwrap_or_else(|| self.bundle_name())
    }

    fn has_extension(&self, extension: &str) -> bool {
        self.path.extension().is_some_and(|ext| ext == extension)
    }

    /// Whether the directory has the `app` extension
    #[must_use]
    pub fn is_application(&self) -> bool {
        self.has_extension(APPLICATION_EXTENSION)
    }

    /// Whether the directory has the `bundle` extension
    #[must_use]
    pub fn is_plugin_bundle(&self) -> bool {
        self.has_extension(PLUGIN_BUNDLE_EXTENSION)
    }

    /// Whether the directory has the `appex` extension
    #[must_use]
    pub fn is_application_extension(&self) -> bool {
        self.has_extension(APPLICATION_EXTENSION_BUNDLE_EXTENSION)
    }

    /// Extension attributes, from `NSExtension` or, failing that,
    /// `EXAppExtensionAttributes`
    #[must_use]
    pub fn application_extension_info(&self) -> Option<&Map<String, Value>> {
        self.object(EXTENSION_KEY)
            .and_then(Value::as_object)
            .or_else(|| self.object(EXTENSION_KIT_KEY).and_then(Value::as_object))
    }

    /// Extension point the bundle plugs into
    #[must_use]
    pub fn application_extension_point_identifier(&self) -> Option<&str> {
        if let Some(attributes) = self.object(EXTENSION_KEY).and_then(Value::as_object) {
            return attributes.get(EXTENSION_POINT_KEY).and_then(Value::as_str);
        }
        self.object(EXTENSION_KIT_KEY)
            .and_then(Value::as_object)
            .and_then(|attributes| attributes.get(EXTENSION_KIT_POINT_KEY))
            .and_then(Value::as_str)
    }

    fn parent_application_path(&self) -> Option<PathBuf> {
        self.path
            .ancestors()
            .skip(1)
            .take(PARENT_APPLICATION_MAXIMUM_LEVELS)
            .find(|ancestor| ancestor.extension().is_some_and(|ext| ext == APPLICATION_EXTENSION))
            .map(Path::to_path_buf)
    }

    /// Closest application containing this bundle, at most
    /// [`PARENT_APPLICATION_MAXIMUM_LEVELS`] directories up
    #[must_use]
    pub fn parent_application_bundle(&self) -> Option<Bundle> {
        let parent = self.parent_application_path()?;
        match Bundle::load(&parent) {
            Ok(bundle) => Some(bundle),
            Err(err) => {
                debug!(parent = %parent.display(), error = %err, "Containing application failed to load");
                None
            }
        }
    }

    /// Every containing application, innermost first
    #[must_use]
    pub fn parent_application_bundles(&self) -> Vec<Bundle> {
        let mut parents = Vec::new();
        let mut current = self.parent_application_bundle();
        while let Some(parent) = current {
            current = parent.parent_application_bundle();
            parents.push(parent);
        }
        parents
    }

    fn bundles_in(directory: &Path) -> Vec<Bundle> {
        let Ok(entries) = std::fs::read_dir(directory) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter_map(|path| Bundle::load(path).ok())
            .collect()
    }

    /// Application extensions shipped in `PlugIns/` and `Extensions/`,
    /// sorted by stable identifier
    #[must_use]
    pub fn built_in_application_extension_bundles(&self) -> Vec<Bundle> {
        let mut bundles: Vec<Bundle> = [PLUGINS_DIRECTORY, EXTENSIONS_DIRECTORY]
            .into_iter()
            .flat_map(|directory| Self::bundles_in(&self.contents.join(directory)))
            .filter(Bundle::is_application_extension)
            .collect();
        bundles.sort();
        bundles
    }

    fn resources_directory(&self) -> PathBuf {
        let resources = self.contents.join(RESOURCES_DIRECTORY);
        if resources.is_dir() {
            resources
        } else {
            self.contents.clone()
        }
    }

    /// Resource `name[.subextension].path_extension`
    ///
    /// # Errors
    /// Returns a bundle error "Error loading resource “name” in bundle
    /// “bundle name”." when the file does not exist.
    pub fn load_resource_file(
        &self,
        name: &str,
        subextension: Option<&str>,
        path_extension: &str,
    ) -> KitResult<PathBuf> {
        let mut file_name = name.to_string();
        for extension in subextension.into_iter().chain([path_extension]) {
            if !extension.is_empty() {
                file_name.push('.');
                file_name.push_str(extension);
            }
        }

        let path = self.resources_directory().join(file_name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(GenericError::bundle(format!(
                "Error loading resource “{name}” in bundle “{}”.",
                self.bundle_name()
            )))
        }
    }

    fn link(&self, key_suffix: &str) -> KitResult<Url> {
        self.string(&format!("{LINK_KEY_PREFIX}{key_suffix}"))
            .and_then(|link| link.generic_url())
            .ok_or_else(|| {
                GenericError::bundle(format!(
                    "Valid link with key “{key_suffix}” not found in the bundle “{}”.",
                    self.bundle_name()
                ))
            })
    }

    /// Link stored under `NSXPrivacyPolicyLink`
    ///
    /// # Errors
    /// Returns a bundle error when the key is missing or not a URL.
    pub fn privacy_policy_link(&self) -> KitResult<Url> {
        self.link(PRIVACY_POLICY_LINK_KEY)
    }

    /// Link stored under `NSXTermsOfUseLink`
    ///
    /// # Errors
    /// Returns a bundle error when the key is missing or not a URL.
    pub fn terms_of_use_link(&self) -> KitResult<Url> {
        self.link(TERMS_OF_USE_LINK_KEY)
    }

    /// Open the privacy policy link with the platform opener
    ///
    /// # Errors
    /// Returns the lookup error or the opening error.
    pub fn open_privacy_policy_link(&self, config: &KitConfig) -> KitResult<()> {
        crate::url::open_url(&self.privacy_policy_link()?, config)
    }

    /// Open the terms of use link with the platform opener
    ///
    /// # Errors
    /// Returns the lookup error or the opening error.
    pub fn open_terms_of_use_link(&self, config: &KitConfig) -> KitResult<()> {
        crate::url::open_url(&self.terms_of_use_link()?, config)
    }
}

impl PartialEq for Bundle {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Bundle {}

impl PartialOrd for Bundle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bundles order by stable identifier, then by location
impl Ord for Bundle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.stable_identifier()
            .cmp(&other.stable_identifier())
            .then_with(|| self.path.cmp(&other.path))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for bundle loading and information dictionary accessors
    //!
    //! Bundles are laid out inside `tempfile` directories.

    use serde_json::json;

    use super::*;
    use crate::error::ErrorDomain;

    fn write_bundle(root: &Path, relative: &str, info: Value) -> PathBuf {
        let path = root.join(relative);
        let contents = path.join(CONTENTS_DIRECTORY);
        std::fs::create_dir_all(&contents).unwrap();
        std::fs::write(contents.join(INFO_FILE_NAME), info.to_string()).unwrap();
        path
    }

    #[test]
    fn test_load_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = Bundle::load(dir.path().join("Missing.app")).unwrap_err();
        assert_eq!(err.domain(), ErrorDomain::Bundle);
    }

    #[test]
    fn test_load_without_info_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bare.bundle");
        std::fs::create_dir(&path).unwrap();

        let bundle = Bundle::load(&path).unwrap();
        assert!(bundle.info_dictionary().is_empty());
        assert_eq!(bundle.bundle_name(), "Bare");
        assert!(bundle.is_plugin_bundle());
        assert_eq!(bundle.stable_identifier(), "Bare");
    }

    /// Validates the bundle name fallback chain.
    ///
    /// Assertions:
    /// - Display name wins over the bundle name.
    /// - The executable stem is used when no name key is present.
    #[test]
    fn test_bundle_name_fallbacks() {
        let dir = tempfile::tempdir().unwrap();

        let named = write_bundle(
            dir.path(),
            "A.app",
            json!({ "CFBundleDisplayName": "Shown", "CFBundleName": "Base" }),
        );
        assert_eq!(Bundle::load(named).unwrap().bundle_name(), "Shown");

        let base = write_bundle(dir.path(), "B.app", json!({ "CFBundleName": "Base" }));
        assert_eq!(Bundle::load(base).unwrap().bundle_name(), "Base");

        let executable = write_bundle(dir.path(), "C.app", json!({ "CFBundleExecutable": "tool.bin" }));
        assert_eq!(Bundle::load(executable).unwrap().bundle_name(), "tool");
    }

    #[test]
    fn test_versions_and_display_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bundle(
            dir.path(),
            "Example.app",
            json!({
                "CFBundleName": "Example",
                "CFBundleShortVersionString": "1.2",
                "CFBundleVersion": "34",
                "NSHumanReadableCopyright": "© Example",
            }),
        );
        let bundle = Bundle::load(path).unwrap();
        assert_eq!(bundle.display_name_with_version(), "Example 1.2 (34)");
        assert_eq!(bundle.human_readable_copyright(), Some("© Example"));
        assert_eq!(bundle.human_readable_description(), None);

        let empty = write_bundle(dir.path(), "Empty.app", json!({ "CFBundleShortVersionString": "" }));
        let empty = Bundle::load(empty).unwrap();
        assert_eq!(empty.bundle_short_version(), None);
        assert_eq!(empty.display_name_with_version(), "Empty");
    }

    #[test]
    fn test_invalid_info_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bundle(dir.path(), "List.app", json!([1, 2]));
        assert_eq!(Bundle::load(path).unwrap_err().domain(), ErrorDomain::Bundle);
    }

    #[test]
    fn test_extension_point_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let foundation = write_bundle(
            dir.path(),
            "Share.appex",
            json!({ "NSExtension": { "NSExtensionPointIdentifier": "com.apple.share-services" } }),
        );
        let foundation = Bundle::load(foundation).unwrap();
        assert!(foundation.is_application_extension());
        assert_eq!(foundation.application_extension_point_identifier(), Some("com.apple.share-services"));

        let kit = write_bundle(
            dir.path(),
            "Kit.appex",
            json!({ "EXAppExtensionAttributes": { "EXExtensionPointIdentifier": "com.example.point" } }),
        );
        assert_eq!(Bundle::load(kit).unwrap().application_extension_point_identifier(), Some("com.example.point"));
    }

    /// Validates containing applications are found up to four levels up.
    #[test]
    fn test_parent_application_bundles() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "Outer.app", json!({ "CFBundleIdentifier": "com.example.outer" }));
        write_bundle(
            dir.path(),
            "Outer.app/Contents/Library/Inner.app",
            json!({ "CFBundleIdentifier": "com.example.inner" }),
        );
        let helper = write_bundle(
            dir.path(),
            "Outer.app/Contents/Library/Inner.app/Contents/PlugIns/Helper.appex",
            json!({}),
        );

        let helper = Bundle::load(helper).unwrap();
        let parents = helper.parent_application_bundles();
        let identifiers: Vec<_> = parents.iter().map(Bundle::stable_identifier).collect();
        assert_eq!(identifiers, vec!["com.example.inner", "com.example.outer"]);

        let deep = write_bundle(dir.path(), "Outer.app/a/b/c/d/Deep.bundle", json!({}));
        assert!(Bundle::load(deep).unwrap().parent_application_bundle().is_none());
    }

    #[test]
    fn test_built_in_application_extension_bundles_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let app = write_bundle(dir.path(), "Host.app", json!({}));
        write_bundle(dir.path(), "Host.app/Contents/PlugIns/Zed.appex", json!({ "CFBundleIdentifier": "z" }));
        write_bundle(dir.path(), "Host.app/Contents/Extensions/Alpha.appex", json!({ "CFBundleIdentifier": "a" }));
        write_bundle(dir.path(), "Host.app/Contents/PlugIns/Other.bundle", json!({}));

        let extensions = Bundle::load(app).unwrap().built_in_application_extension_bundles();
        let identifiers: Vec<_> = extensions.iter().map(Bundle::stable_identifier).collect();
        assert_eq!(identifiers, vec!["a", "z"]);
    }

    #[test]
    fn test_load_resource_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = write_bundle(dir.path(), "Res.app", json!({ "CFBundleName": "Res" }));
        let resources = app.join("Contents").join("Resources");
        std::fs::create_dir_all(&resources).unwrap();
        std::fs::write(resources.join("strings.en.json"), "{}").unwrap();

        let bundle = Bundle::load(&app).unwrap();
        assert_eq!(
            bundle.load_resource_file("strings", Some("en"), "json").unwrap(),
            resources.join("strings.en.json")
        );
        let err = bundle.load_resource_file("missing", None, "txt").unwrap_err();
        assert_eq!(err.to_string(), "Error loading resource “missing” in bundle “Res”.");
    }

    #[test]
    fn test_links() {
        let dir = tempfile::tempdir().unwrap();
        let app = write_bundle(
            dir.path(),
            "Links.app",
            json!({ "CFBundleName": "Links", "NSXPrivacyPolicyLink": "https://example.com/privacy" }),
        );
        let bundle = Bundle::load(app).unwrap();
        assert_eq!(bundle.privacy_policy_link().unwrap().as_str(), "https://example.com/privacy");

        let err = bundle.terms_of_use_link().unwrap_err();
        assert_eq!(err.to_string(), "Valid link with key “TermsOfUseLink” not found in the bundle “Links”.");
    }

    #[test]
    fn test_flat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Flat.bundle");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join(INFO_FILE_NAME), r#"{"CFBundleIdentifier":"com.example.flat"}"#).unwrap();
        std::fs::write(path.join("data.txt"), "x").unwrap();

        let bundle = Bundle::load(&path).unwrap();
        assert_eq!(bundle.bundle_identifier(), Some("com.example.flat"));
        assert_eq!(bundle.load_resource_file("data", None, "txt").unwrap(), path.join("data.txt"));
    }
}
