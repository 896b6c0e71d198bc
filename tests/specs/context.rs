//! Context specs
//!
//! Verify register metadata and totals.

use crate::prelude::*;

#[test]
fn context_of_bootstrapped_register() {
    let temp = Project::country();

    temp.registers()
        .args(&["context", "--rsf", "country.rsf"])
        .passes()
        .stdout_has("name:          country\n")
        .stdout_has("fields:        country;name\n")
        .stdout_has("total-records: 0\n")
        .stdout_has("last-updated:  2024-01-01T00:00:00Z\n");
}

#[test]
fn context_json_counts_user_records() {
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
            "2024-05-01T00:00:00Z",
            "--apply",
        ])
        .passes();

    temp.registers()
        .args(&["context", "--rsf", "country.rsf", "--output", "json"])
        .passes()
        .stdout_has("\"name\": \"country\"")
        .stdout_has("\"total-records\": 2")
        .stdout_has("\"total-entries\": 2")
        .stdout_has("\"last-updated\": \"2024-05-01T00:00:00Z\"")
        .stdout_has("\"root-hash\": \"sha-256:");
}
