//! Records specs
//!
//! Verify current records, single records and history output.

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
fn records_empty_register() {
    let temp = Project::country();

    temp.registers()
        .args(&["records", "--rsf", "country.rsf"])
        .passes()
        .stdout_eq("No records\n");
}

#[test]
fn records_lists_current_entries() {
    let temp = populated();

    temp.registers()
        .args(&["records", "--rsf", "country.rsf"])
        .passes()
        .stdout_has("{\"country\":\"1\",\"name\":\"Alpha\"}")
        .stdout_has("{\"country\":\"2\",\"name\":\"Beta\"}");
}

#[test]
fn records_as_csv_use_schema_field_order() {
    let temp = populated();

    temp.registers()
        .args(&["records", "--rsf", "country.rsf", "--output", "csv"])
        .passes()
        .stdout_eq(COUNTRIES_CSV);
}

#[test]
fn records_single_key_as_json() {
    let temp = populated();

    temp.registers()
        .args(&["records", "2", "--rsf", "country.rsf", "--output", "json"])
        .passes()
        .stdout_has("\"key\": \"2\"")
        .stdout_has("\"entry-timestamp\": \"2024-01-01T00:00:00Z\"")
        .stdout_has("\"name\": \"Beta\"");
}

#[test]
fn records_history_keeps_superseded_entries() {
    let temp = populated();
    temp.file("update.csv", "country,name\n1,Alpha Prime\n");
    temp.registers()
        .args(&[
            "patch",
            "create",
            "update.csv",
            "--rsf",
            "country.rsf",
            "--timestamp",
            "2024-06-01T00:00:00Z",
            "--apply",
        ])
        .passes();

    temp.registers()
        .args(&["records", "1", "--rsf", "country.rsf", "--output", "csv"])
        .passes()
        .stdout_eq("country,name\n1,Alpha Prime\n");

    temp.registers()
        .args(&["records", "1", "--history", "--rsf", "country.rsf", "--output", "csv"])
        .passes()
        .stdout_eq("country,name\n1,Alpha\n1,Alpha Prime\n");
}

#[test]
fn records_unknown_key() {
    let temp = populated();

    temp.registers()
        .args(&["records", "9", "--rsf", "country.rsf"])
        .fails()
        .stderr_has("error: Record '9' not found");
}

#[test]
fn history_requires_key() {
    let temp = populated();

    temp.registers()
        .args(&["records", "--history", "--rsf", "country.rsf"])
        .fails();
}
