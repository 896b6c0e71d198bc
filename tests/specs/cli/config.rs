//! CLI configuration specs
//!
//! Verify the RSF path resolves from flag, environment and config file.

use crate::prelude::*;

#[test]
fn rsf_from_environment() {
    let temp = Project::country();

    temp.registers()
        .env("REGISTERS_RSF", "country.rsf")
        .args(&["records"])
        .passes()
        .stdout_eq("No records\n");
}

#[test]
fn rsf_from_config_file() {
    let temp = Project::country();
    temp.file("registers.toml", "rsf = \"country.rsf\"\n");

    temp.registers()
        .args(&["context"])
        .passes()
        .stdout_has("name:          country");
}

#[test]
fn flag_wins_over_config_file() {
    let temp = Project::country();
    temp.file("registers.toml", "rsf = \"missing.rsf\"\n");

    temp.registers()
        .args(&["context", "--rsf", "country.rsf"])
        .passes();
}

#[test]
fn unknown_config_key_is_rejected() {
    let temp = Project::empty();
    temp.file("registers.toml", "colour = \"blue\"\n");

    temp.registers()
        .args(&["records"])
        .fails()
        .stderr_has("invalid config registers.toml");
}

#[test]
fn completions_need_no_config() {
    let temp = Project::empty();
    temp.file("registers.toml", "colour = \"blue\"\n");

    temp.registers()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("registers");
}
