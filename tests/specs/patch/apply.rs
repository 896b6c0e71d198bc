//! Patch apply specs
//!
//! Verify patches are validated as a whole before anything is appended.

use crate::prelude::*;

fn apply_rows(temp: &Project, rows: &str, timestamp: &str) -> CliBuilder {
    temp.file("rows.csv", rows);
    temp.registers().args(&[
        "patch",
        "create",
        "rows.csv",
        "--rsf",
        "country.rsf",
        "--timestamp",
        timestamp,
        "--apply",
    ])
}

#[test]
fn earlier_entry_for_same_key_is_rejected() {
    let temp = Project::country();
    apply_rows(&temp, "country,name\n1,Alpha\n", "2024-02-01T00:00:00Z").passes();
    let before = temp.read("country.rsf");

    apply_rows(&temp, "country,name\n1,Gamma\n", "2024-01-15T00:00:00Z")
        .fails()
        .stderr_has("Patch rejected with 1 validation error(s)")
        .stderr_has("is earlier than its current entry")
        .stderr_has("Nothing was appended");

    assert_eq!(temp.read("country.rsf"), before);
}

#[test]
fn apply_file_appends_patch() {
    let temp = Project::country();
    temp.file("rows.csv", COUNTRIES_CSV);
    let run = temp
        .registers()
        .args(&[
            "patch",
            "create",
            "rows.csv",
            "--rsf",
            "country.rsf",
            "--timestamp",
            "2024-03-01T00:00:00Z",
        ])
        .passes();
    temp.file("changes.rsf", run.stdout());

    temp.registers()
        .args(&["patch", "apply", "changes.rsf", "--rsf", "country.rsf"])
        .passes()
        .stdout_eq("Appended 4 commands to country.rsf\n");

    temp.registers()
        .args(&["records", "--rsf", "country.rsf", "--output", "csv"])
        .passes()
        .stdout_eq(COUNTRIES_CSV);
}

#[test]
fn apply_file_with_missing_item_is_rejected() {
    let temp = Project::country();
    let before = temp.read("country.rsf");
    temp.file(
        "changes.rsf",
        "append-entry\tuser\t1\t2024-03-01T00:00:00Z\tsha-256:0000000000000000000000000000000000000000000000000000000000000000\n",
    );

    temp.registers()
        .args(&["patch", "apply", "changes.rsf", "--rsf", "country.rsf"])
        .fails()
        .stderr_has("references unknown item");

    assert_eq!(temp.read("country.rsf"), before);
}

#[test]
fn apply_file_rejects_malformed_patch() {
    let temp = Project::country();
    temp.file("changes.rsf", "add-thing\t{}\n");

    temp.registers()
        .args(&["patch", "apply", "changes.rsf", "--rsf", "country.rsf"])
        .fails()
        .stderr_has("invalid patch")
        .stderr_has("unknown command 'add-thing'");
}

#[test]
fn apply_file_without_entries_is_rejected() {
    let temp = Project::country();
    temp.file("changes.rsf", "add-item\t{\"country\":\"1\",\"name\":\"Alpha\"}\n");

    temp.registers()
        .args(&["patch", "apply", "changes.rsf", "--rsf", "country.rsf"])
        .fails()
        .stderr_has("no append-entry command");
}
