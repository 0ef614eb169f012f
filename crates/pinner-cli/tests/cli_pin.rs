use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn pinner_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pinner").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("PIN_MODE")
        .env_remove("PINNER_STAGING")
        .env_remove("RUST_LOG");
    cmd
}

fn project(manifest: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Pin.toml"), manifest).unwrap();
    tmp
}

#[test]
fn pin_without_dependencies_succeeds() {
    let tmp = project("[package]\nname = \"github.com/me/app\"\n");
    let staging = tmp.path().join("staging");

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .arg("pin")
        .arg("--staging")
        .arg(&staging)
        .assert()
        .success();
    assert!(staging.is_dir());
}

#[test]
fn pin_json_reports_unsupported_source() {
    let tmp = project("[dependencies]\n\"gitlab.com/foo/bar\" = \"^1\"\n");

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .env("PINNER_STAGING", tmp.path().join("staging"))
        .args(["pin", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"success\": false"))
        .stdout(predicate::str::contains("\"status\": \"unavailable\""))
        .stdout(predicate::str::contains("Unsupported dependency 'gitlab.com/foo/bar'"));
}

#[test]
fn failed_pin_prints_every_error() {
    let tmp = project(
        r#"
[dependencies]
"gitlab.com/foo/bar" = "^1"
"bitbucket.org/foo/baz" = "^2"
"#,
    );

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .arg("pin")
        .arg("--staging")
        .arg(tmp.path().join("staging"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("gitlab.com/foo/bar"))
        .stderr(predicate::str::contains("bitbucket.org/foo/baz"))
        .stderr(predicate::str::contains("could not pin dependencies (2 errors)"));
}

#[test]
fn tree_of_empty_project_prints_root() {
    let tmp = project("[package]\nname = \"github.com/me/app\"\n");

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .arg("tree")
        .assert()
        .success()
        .stdout("github.com/me/app\n");
}

#[test]
fn tree_marks_unsupported_libraries() {
    let tmp = project("[dependencies]\n\"gitlab.com/foo/bar\" = \"^1\"\n");

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .arg("tree")
        .assert()
        .success()
        .stdout("(root)\n└── gitlab.com/foo/bar (unavailable) (^1)\n")
        .stderr(predicate::str::contains("Unsupported dependency"));
}

#[test]
fn verbose_pin_shows_discovery_summary() {
    let tmp = project("[dependencies]\n\"gitlab.com/foo/bar\" = \"^1\"\n");
    let staging = tmp.path().join("staging");

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .args(["pin", "--verbose", "--staging"])
        .arg(&staging)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Discovered 1 libraries with 1 constraints"));

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .args(["pin", "--staging"])
        .arg(&staging)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Discovered").not());
}
