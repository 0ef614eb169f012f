use std::path::PathBuf;

use pinner_core::config::{dirs_path, Config, ResolveStrategy, STAGING_ENV};

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.sources.hosts, vec!["github.com"]);
    assert_eq!(config.sources.protocol, "https");
    assert_eq!(config.tags.prefix, "v");
    assert!(config.tags.prefix_required);
    assert_eq!(config.probe.command, vec!["pinner", "report"]);
    assert_eq!(config.probe.manifest, "Pin.toml");
    assert_eq!(config.probe.delimiter, ' ');
    assert_eq!(config.resolve.strategy, ResolveStrategy::SinglePass);
    assert_eq!(config.resolve.max_rounds, 8);
}

#[test]
fn test_defaults_from_empty_toml() {
    let config = Config::from_str("").unwrap();
    assert!(config.tags.prefix_required);
    assert_eq!(config.resolve.max_rounds, 8);
    assert!(config.staging.root.is_none());
}

#[test]
fn test_default_staging_root_under_data_dir() {
    let config = Config::default();
    assert_eq!(config.staging_root(), dirs_path().join("staging"));
    assert!(dirs_path().ends_with(".pinner"));
}

#[test]
fn test_config_parse_from_toml() {
    let toml = r#"
[staging]
root = "/tmp/pin-staging"

[sources]
hosts = ["github.com", "git.example.org"]
protocol = "ssh"

[tags]
prefix = "release-"
prefix-required = false

[probe]
command = ["cargo", "run", "--quiet", "--", "report"]
manifest = "deps.toml"
delimiter = "\t"

[resolve]
strategy = "fixed-point"
max-rounds = 3
"#;
    let config = Config::from_str(toml).unwrap();
    assert_eq!(config.staging_root(), PathBuf::from("/tmp/pin-staging"));
    assert_eq!(config.source_rules().hosts.len(), 2);
    assert_eq!(config.source_rules().protocol, "ssh");
    assert_eq!(config.tags.prefix, "release-");
    assert!(!config.tags.prefix_required);
    assert_eq!(config.probe.command[0], "cargo");
    assert_eq!(config.probe.manifest, "deps.toml");
    assert_eq!(config.probe.delimiter, '\t');
    assert_eq!(config.resolve.strategy, ResolveStrategy::FixedPoint);
    assert_eq!(config.resolve.max_rounds, 3);
}

#[test]
fn test_invalid_config_is_error() {
    let err = Config::from_str("[resolve]\nstrategy = \"backtracking\"").unwrap_err();
    assert!(err.to_string().contains("Configuration error"), "got: {err}");
}

#[test]
fn test_env_override_of_staging_root() {
    let mut config = Config::default();
    config.apply_overrides(|key| (key == STAGING_ENV).then(|| "/srv/stage".to_string()));
    assert_eq!(config.staging_root(), PathBuf::from("/srv/stage"));
}

#[test]
fn test_empty_env_override_is_ignored() {
    let mut config = Config::default();
    config.apply_overrides(|_| Some(String::new()));
    assert!(config.staging.root.is_none());
}

#[test]
fn test_from_path() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[tags]\nprefix = \"r\"\n").unwrap();
    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.tags.prefix, "r");
    assert!(Config::from_path(&tmp.path().join("missing.toml")).is_err());
}
