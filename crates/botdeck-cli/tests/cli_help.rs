use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("botdeck")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("bots"))
        .stdout(predicate::str::contains("units"))
        .stdout(predicate::str::contains("processes"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_bots_help_shows_list() {
    cargo_bin_cmd!("botdeck")
        .args(["bots", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_bots_list_help_shows_flags() {
    cargo_bin_cmd!("botdeck")
        .args(["bots", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--search"))
        .stdout(predicate::str::contains("--status"))
        .stdout(predicate::str::contains("--page-size"))
        .stdout(predicate::str::contains("--demo"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("botdeck")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.0"));
}
