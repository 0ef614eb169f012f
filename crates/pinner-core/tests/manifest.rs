use pinner_core::manifest::PinManifest;

#[test]
fn test_parse_dependencies() {
    let manifest = PinManifest::from_str(
        r#"
[package]
name = "github.com/me/app"

[dependencies]
"github.com/foo/bar" = ">= 1.0, < 2.0"
"github.com/baz/qux" = "= 0.1.0"
"#,
    )
    .unwrap();
    assert_eq!(manifest.root_name(), "github.com/me/app");
    assert_eq!(manifest.dependencies.len(), 2);
    assert_eq!(
        manifest.dependencies.get("github.com/foo/bar").map(String::as_str),
        Some(">= 1.0, < 2.0")
    );
}

#[test]
fn test_empty_manifest() {
    let manifest = PinManifest::from_str("").unwrap();
    assert!(manifest.dependencies.is_empty());
    assert_eq!(manifest.root_name(), "(root)");
}

#[test]
fn test_invalid_manifest() {
    let err = PinManifest::from_str("[dependencies]\n\"a\" = 3").unwrap_err();
    assert!(err.to_string().contains("Manifest error"), "got: {err}");
}

#[test]
fn test_from_path_missing_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = PinManifest::from_path(&tmp.path().join("Pin.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"), "got: {err}");
}
