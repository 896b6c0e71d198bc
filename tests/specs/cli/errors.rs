//! CLI error specs
//!
//! Verify failures print an actionable message and exit non-zero.

use crate::prelude::*;

#[test]
fn missing_rsf_suggests_how_to_configure() {
    let temp = Project::empty();

    temp.registers()
        .args(&["records"])
        .fails()
        .stderr_has("error: No RSF file given")
        .stderr_has("suggestions:")
        .stderr_has("--rsf <file>");
}

#[test]
fn rsf_not_found() {
    let temp = Project::empty();

    temp.registers()
        .args(&["context", "--rsf", "nowhere.rsf"])
        .fails()
        .stderr_has("log file not found: nowhere.rsf");
}

#[test]
fn register_without_schema_is_not_ready() {
    let temp = Project::empty();
    temp.file("empty.rsf", "");

    temp.registers()
        .args(&["records", "--rsf", "empty.rsf"])
        .fails()
        .stderr_has("error: Register in empty.rsf is not ready");
}

#[test]
fn corrupt_log_reports_line() {
    let temp = Project::country();
    let mut rsf = temp.read("country.rsf");
    rsf.push_str("append-entry\tuser\n");
    temp.file("country.rsf", &rsf);

    temp.registers()
        .args(&["records", "--rsf", "country.rsf"])
        .fails()
        .stderr_has("line 10:");
}

#[test]
fn unknown_subcommand_fails() {
    let temp = Project::empty();

    temp.registers().args(&["frobnicate"]).fails();
}
