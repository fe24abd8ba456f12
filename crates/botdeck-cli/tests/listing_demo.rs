//! List commands over the built-in sample fleet.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_bots_list_demo() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("botdeck")
        .env("BOTDECK_HOME", home.path())
        .args(["bots", "list", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice Processor"))
        .stdout(predicate::str::contains("5 matching, 5 total bots"))
        .stdout(predicate::str::contains("Running: 1  Idle: 1  Failed: 1"));
}

#[test]
fn test_bots_list_status_filter() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("botdeck")
        .env("BOTDECK_HOME", home.path())
        .args(["bots", "list", "--demo", "--status", "failed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Email Handler Pro"))
        .stdout(predicate::str::contains("1 matching, 5 total bots"))
        .stdout(predicate::str::contains("Invoice Processor").not());
}

#[test]
fn test_bots_list_search() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("botdeck")
        .env("BOTDECK_HOME", home.path())
        .args(["bots", "list", "--demo", "--search", "INVOICE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice Processor"))
        .stdout(predicate::str::contains("1 matching, 5 total bots"));
}

#[test]
fn test_bots_list_sort_desc_first_page() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("botdeck")
        .env("BOTDECK_HOME", home.path())
        .args([
            "bots", "list", "--demo", "--sort", "name", "--desc", "--page-size", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report Generator"))
        .stdout(predicate::str::contains("Page 1 of 5"))
        .stdout(predicate::str::contains("Customer Data Validator").not());
}

#[test]
fn test_bots_list_page_beyond_end_is_empty() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("botdeck")
        .env("BOTDECK_HOME", home.path())
        .args(["bots", "list", "--demo", "--page", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bots found."))
        .stdout(predicate::str::contains("5 matching, 5 total bots"));
}

#[test]
fn test_units_list_demo() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("botdeck")
        .env("BOTDECK_HOME", home.path())
        .args(["units", "list", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sarah Johnson"))
        .stdout(predicate::str::contains(
            "Active: 3/4  Processes: 41  Monthly savings: $39.7K",
        ));
}

#[test]
fn test_units_list_search_by_manager() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("botdeck")
        .env("BOTDECK_HOME", home.path())
        .args(["units", "list", "--demo", "--search", "sarah"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Human Resources"))
        .stdout(predicate::str::contains("1 matching, 4 total units"));
}

#[test]
fn test_processes_list_status_filter() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("botdeck")
        .env("BOTDECK_HOME", home.path())
        .args(["processes", "list", "--demo", "--status", "active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 matching, 6 total processes"))
        .stdout(predicate::str::contains(
            "Active: 3/6  Automated: 5  Avg efficiency: 95%",
        ));
}

#[test]
fn test_listing_without_session_requires_login() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("botdeck")
        .env("BOTDECK_HOME", home.path())
        .args(["bots", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}
