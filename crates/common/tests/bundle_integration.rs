//! Integration tests for bundles, built with the `testing` fixtures

use foundationkit_common::bundle::Bundle;
use foundationkit_common::error::ErrorDomain;
use foundationkit_common::testing::fixtures::{application_extension_info, application_info};
use foundationkit_common::testing::BundleFixture;
use serde_json::json;

/// Validates a host application with nested extensions and a helper.
///
/// Assertions:
/// - Extensions from both extension directories are found and sorted.
/// - Every extension resolves the host as its containing application.
/// - Non-extension bundles are ignored.
#[test]
fn test_application_with_extensions() {
    let fixture = BundleFixture::new().unwrap();
    fixture.create("Host.app", &application_info("Host", "com.example.host")).unwrap();
    fixture
        .create(
            "Host.app/Contents/PlugIns/Widget.appex",
            &application_extension_info("com.example.host.widget", "com.apple.widgetkit-extension"),
        )
        .unwrap();
    fixture
        .create(
            "Host.app/Contents/Extensions/Actions.appex",
            &json!({
                "CFBundleIdentifier": "com.example.host.actions",
                "EXAppExtensionAttributes": { "EXExtensionPointIdentifier": "com.example.actions" },
            }),
        )
        .unwrap();
    fixture.create("Host.app/Contents/PlugIns/Legacy.bundle", &json!({})).unwrap();

    let host = Bundle::load(fixture.root().join("Host.app")).unwrap();
    assert!(host.is_application());
    assert_eq!(host.display_name_with_version(), "Host 1.0 (1)");

    let extensions = host.built_in_application_extension_bundles();
    let identifiers: Vec<_> = extensions.iter().filter_map(Bundle::bundle_identifier).collect();
    assert_eq!(identifiers, vec!["com.example.host.actions", "com.example.host.widget"]);

    for extension in &extensions {
        assert!(extension.application_extension_point_identifier().is_some());
        let parent = extension.parent_application_bundle().unwrap();
        assert_eq!(parent.bundle_identifier(), Some("com.example.host"));
    }
}

#[test]
fn test_resources_and_links() {
    let fixture = BundleFixture::new().unwrap();
    let mut info = application_info("Docs", "com.example.docs");
    info["NSXTermsOfUseLink"] = json!("https://example.com/terms");
    let bundle = fixture.bundle("Docs.app", &info).unwrap();
    fixture.add_resource("Docs.app", "Help.en.html", "<html/>").unwrap();

    assert!(bundle.load_resource_file("Help", Some("en"), "html").is_ok());
    foundationkit_common::assert_error_contains!(
        bundle.load_resource_file("Help", Some("fr"), "html"),
        "Error loading resource “Help”"
    );

    assert_eq!(bundle.terms_of_use_link().unwrap().host_str(), Some("example.com"));
    foundationkit_common::assert_error_domain!(bundle.privacy_policy_link(), ErrorDomain::Bundle);
}
