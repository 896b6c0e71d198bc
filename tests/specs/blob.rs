//! Blob specs
//!
//! Verify blobs are listed from the log and validated against its schema.

use crate::prelude::*;

fn populated() -> Project {
    let temp = Project::country();
    temp.file("rows.csv", COUNTRIES_CSV);
    temp.registers()
        .args(&[
            "patch",
            "create",
            "rows.csv",
            "--rsf",
            "country.rsf",
            "--timestamp",
            "2024-01-01T00:00:00Z",
            "--apply",
        ])
        .passes();
    temp
}

#[test]
fn list_without_entries() {
    let temp = Project::country();

    temp.registers()
        .args(&["blob", "list", "--rsf", "country.rsf"])
        .passes()
        .stdout_eq("No blobs\n");
}

#[test]
fn list_leaves_out_metadata() {
    let temp = populated();

    let run = temp
        .registers()
        .args(&["blob", "list", "--rsf", "country.rsf"])
        .passes()
        .stdout_has("{\"country\":\"1\",\"name\":\"Alpha\"}")
        .stdout_has("{\"country\":\"2\",\"name\":\"Beta\"}");
    assert_eq!(run.stdout().lines().count(), 2);
    assert!(run.stdout().lines().all(|l| l.starts_with("sha-256:")));
}

#[test]
fn list_as_csv() {
    let temp = populated();

    let run = temp
        .registers()
        .args(&["blob", "list", "--rsf", "country.rsf", "--output", "csv"])
        .passes();
    let mut lines: Vec<&str> = run.stdout().lines().collect();
    assert_eq!(lines.remove(0), "country,name");
    lines.sort_unstable();
    assert_eq!(lines, ["1,Alpha", "2,Beta"]);
}

#[test]
fn list_as_json_keyed_by_hash() {
    let temp = populated();

    temp.registers()
        .args(&["blob", "list", "--rsf", "country.rsf", "--output", "json"])
        .passes()
        .stdout_has("\"sha-256:")
        .stdout_has("\"name\": \"Beta\"");
}

#[test]
fn validate_conforming_blob() {
    let temp = Project::country();

    temp.registers()
        .args(&[
            "blob",
            "validate",
            "--rsf",
            "country.rsf",
            r#"{"name": "Zeta", "country": "ZZ"}"#,
        ])
        .passes()
        .stdout_eq("'{\"country\":\"ZZ\",\"name\":\"Zeta\"}' is valid for the 'country' register.\n");
}

#[test]
fn validate_reports_every_violation() {
    let temp = Project::country();

    temp.registers()
        .args(&[
            "blob",
            "validate",
            "--rsf",
            "country.rsf",
            r#"{"name": ["Zeta"], "colour": "red"}"#,
        ])
        .fails()
        .stderr_has("3 violation(s)")
        .stderr_has("unknown field 'colour'")
        .stderr_has("missing primary key field 'country'");
}

#[test]
fn validate_rejects_malformed_json() {
    let temp = Project::country();

    temp.registers()
        .args(&["blob", "validate", "--rsf", "country.rsf", "{nope"])
        .fails()
        .stderr_has("error: The given blob is not well formed JSON");
}
