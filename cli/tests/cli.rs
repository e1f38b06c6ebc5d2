#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Binary surface tests. These only exercise argument parsing and help
//! output; nothing here talks to a provider.

use assert_cmd::Command;
use predicates::prelude::*;

fn platform() -> Command {
    Command::cargo_bin("platform").expect("binary built")
}

#[test]
fn help_lists_the_three_command_groups() {
    platform()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("instance"))
        .stdout(predicate::str::contains("bucket"))
        .stdout(predicate::str::contains("zone"));
}

#[test]
fn instance_create_without_required_flags_is_a_usage_error() {
    platform()
        .args(["instance", "create"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--owner"));
}

#[test]
fn invalid_environment_is_rejected_at_the_argument_boundary() {
    platform()
        .args([
            "instance", "create", "--owner", "a", "--project", "p", "--env", "staging",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid environment"));
}

#[test]
fn zone_record_rejects_unsupported_types() {
    platform()
        .args([
            "zone",
            "record",
            "Z1",
            "www.example.com",
            "1.2.3.4",
            "--type",
            "MX",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported record type"));
}
