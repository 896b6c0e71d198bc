//! Init specs
//!
//! Verify register bootstrapping writes a fresh RSF log.

use crate::prelude::*;

const EMPTY_ROOT: &str = "sha-256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

#[test]
fn init_creates_log_named_after_register() {
    let temp = Project::empty();

    temp.registers()
        .args(&["init", "country", "--field", "name:string", "--timestamp", BOOTSTRAP_TS])
        .passes()
        .stdout_eq("Created register 'country' at country.rsf (9 commands)\n");

    let rsf = temp.read("country.rsf");
    let lines: Vec<&str> = rsf.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], format!("assert-root-hash\t{}", EMPTY_ROOT));
    assert!(lines[1].starts_with("add-item\t{\"name\":\"country\"}"));
    assert!(lines[2].starts_with("append-entry\tsystem\tname\t2024-01-01T00:00:00Z\tsha-256:"));
    assert!(rsf.contains("append-entry\tsystem\tfield:country\t"));
    assert!(rsf.contains("append-entry\tsystem\tfield:name\t"));
    assert!(rsf.contains("append-entry\tsystem\tregister:country\t"));
    assert!(rsf.ends_with('\n'));
}

#[test]
fn init_with_custodian_and_explicit_path() {
    let temp = Project::empty();

    std::fs::create_dir_all(temp.join("data")).unwrap();
    temp.registers()
        .args(&[
            "init",
            "country",
            "--rsf",
            "data/countries.rsf",
            "--custodian",
            "Jane Doe",
            "--description",
            "Countries",
            "--timestamp",
            BOOTSTRAP_TS,
        ])
        .passes()
        .stdout_has("(11 commands)");

    let rsf = temp.read("data/countries.rsf");
    assert!(rsf.contains("append-entry\tsystem\tcustodian\t"));
    assert!(rsf.contains("\"text\":\"Countries\""));
}

#[test]
fn init_refuses_existing_file() {
    let temp = Project::country();
    let before = temp.read("country.rsf");

    temp.registers()
        .args(&["init", "country"])
        .fails()
        .stderr_has("error: country.rsf already exists")
        .stderr_has("init never overwrites an existing log");

    assert_eq!(temp.read("country.rsf"), before);
}

#[test]
fn init_rejects_invalid_name() {
    let temp = Project::empty();

    temp.registers()
        .args(&["init", "bad name"])
        .fails()
        .stderr_has("Invalid register name 'bad name'");
}

#[test]
fn init_rejects_unknown_datatype() {
    let temp = Project::empty();

    temp.registers()
        .args(&["init", "country", "--field", "area:float"])
        .fails()
        .stderr_has("unknown datatype");
    assert!(!temp.join("country.rsf").exists());
}
