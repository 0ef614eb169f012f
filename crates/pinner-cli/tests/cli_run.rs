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

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Pin.toml"),
        "[dependencies]\n\"github.com/foo/bar\" = \"~> 1.2\"\n",
    )
    .unwrap();
    tmp
}

#[test]
fn run_defaults_to_report() {
    let tmp = project();

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .arg("run")
        .assert()
        .success()
        .stdout("github.com/foo/bar ~> 1.2\n");
}

#[test]
fn run_in_report_mode() {
    let tmp = project();

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .env("PIN_MODE", "report")
        .arg("run")
        .assert()
        .success()
        .stdout("github.com/foo/bar ~> 1.2\n");
}

#[test]
fn run_rejects_unknown_mode() {
    let tmp = project();

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .env("PIN_MODE", "bogus")
        .arg("run")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown PIN_MODE 'bogus'"));
}

#[test]
fn run_in_pin_mode_pins() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Pin.toml"), "[dependencies]\n").unwrap();

    pinner_cmd(&tmp)
        .current_dir(tmp.path())
        .env("PIN_MODE", "pin")
        .env("PINNER_STAGING", tmp.path().join("staging"))
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(tmp.path().join("staging").is_dir());
}
