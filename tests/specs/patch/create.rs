//! Patch create specs
//!
//! Verify tabular input becomes a validated RSF patch.

use crate::prelude::*;

#[test]
fn create_prints_patch_without_touching_log() {
    let temp = Project::country();
    temp.file("rows.csv", COUNTRIES_CSV);
    let before = temp.read("country.rsf");

    let run = temp
        .registers()
        .args(&[
            "patch",
            "create",
            "rows.csv",
            "--rsf",
            "country.rsf",
            "--timestamp",
            "2024-01-01T00:00:00Z",
        ])
        .passes();

    let lines: Vec<&str> = run.stdout().lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "add-item\t{\"country\":\"1\",\"name\":\"Alpha\"}");
    assert!(lines[1].starts_with("append-entry\tuser\t1\t2024-01-01T00:00:00Z\tsha-256:"));
    assert_eq!(lines[2], "add-item\t{\"country\":\"2\",\"name\":\"Beta\"}");
    assert!(lines[3].starts_with("append-entry\tuser\t2\t2024-01-01T00:00:00Z\tsha-256:"));

    assert_eq!(temp.read("country.rsf"), before);
}

#[test]
fn create_with_apply_appends_four_commands() {
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
        .passes()
        .stdout_eq("Appended 4 commands to country.rsf\n");

    assert_eq!(temp.read("country.rsf").lines().count(), 13);
}

#[test]
fn create_accepts_tab_separated_input() {
    let temp = Project::country();
    temp.file("rows.tsv", "country\tname\n1\tAlpha, the first\n");

    temp.registers()
        .args(&["patch", "create", "rows.tsv", "--rsf", "country.rsf"])
        .passes()
        .stdout_has("\"name\":\"Alpha, the first\"");
}

#[test]
fn create_rejects_semicolon_delimiter() {
    let temp = Project::country();
    temp.file("rows.csv", "country;name\n1;Alpha\n");

    temp.registers()
        .args(&["patch", "create", "rows.csv", "--rsf", "country.rsf"])
        .fails()
        .stderr_has("';' cannot be used as a column delimiter");
}

#[test]
fn create_reports_every_bad_row() {
    let temp = Project::empty();
    temp.registers()
        .args(&[
            "init",
            "country",
            "--field",
            "population:integer",
            "--timestamp",
            BOOTSTRAP_TS,
        ])
        .passes();
    temp.file("rows.csv", "country,population\n1,many\n2,10\n3,x\n");

    temp.registers()
        .args(&["patch", "create", "rows.csv", "--rsf", "country.rsf"])
        .fails()
        .stderr_has("rows.csv has 2 invalid row(s)")
        .stderr_has("  -> row 1: ")
        .stderr_has("  -> row 3: ");
}

#[test]
fn create_rejects_unknown_column() {
    let temp = Project::country();
    temp.file("rows.csv", "country,capital\n1,Somewhere\n");

    temp.registers()
        .args(&["patch", "create", "rows.csv", "--rsf", "country.rsf"])
        .fails()
        .stderr_has("header column 'capital' is not a field of the register");
}

#[test]
fn create_skips_items_already_in_register() {
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

    let run = temp
        .registers()
        .args(&[
            "patch",
            "create",
            "rows.csv",
            "--rsf",
            "country.rsf",
            "--timestamp",
            "2024-02-01T00:00:00Z",
        ])
        .passes();
    assert!(run.stdout().lines().all(|l| l.starts_with("append-entry\t")));
    assert_eq!(run.stdout().lines().count(), 2);
}

#[test]
fn create_logs_command_count_on_stderr_only() {
    let temp = Project::country();
    temp.file("rows.csv", COUNTRIES_CSV);

    let run = temp
        .registers()
        .env("REGISTERS_LOG", "info")
        .args(&["patch", "create", "rows.csv", "--rsf", "country.rsf"])
        .passes()
        .stderr_has("created patch");
    assert_eq!(run.stdout().lines().count(), 4);
}
