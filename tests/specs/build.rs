//! Build specs
//!
//! Verify the static file tree for a register.

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
fn build_writes_json_and_csv_per_resource() {
    let temp = populated();

    // Two files each for 3 item, 3 entry and 5 record resources
    temp.registers()
        .args(&["build", "--rsf", "country.rsf"])
        .passes()
        .stdout_eq("Built register 'country' in build/country (22 files)\n");

    let root = temp.join("build/country");
    for path in [
        "items/index.json",
        "items/index.csv",
        "entries/index.json",
        "entries/1.json",
        "entries/2.csv",
        "records/index.json",
        "records/1.json",
        "records/2.csv",
        "records/1/entries.json",
    ] {
        assert!(root.join(path).is_file(), "missing {}", path);
    }

    assert_eq!(
        temp.read("build/country/records/index.csv"),
        "entry-number,entry-timestamp,key,country,name\n\
         1,2024-01-01T00:00:00Z,1,1,Alpha\n\
         2,2024-01-01T00:00:00Z,2,2,Beta\n"
    );
    let record = temp.read("build/country/records/2.json");
    assert!(record.starts_with("{\"2\":{\"entry-number\":2,"));
    assert!(temp
        .read("build/country/entries/1.json")
        .starts_with("[{\"index-entry-number\":\"1\",\"entry-number\":\"1\","));
}

#[test]
fn build_replaces_previous_output() {
    let temp = populated();
    temp.file("build/country/stale.json", "{}");

    temp.registers()
        .args(&["build", "--rsf", "country.rsf", "--out", "build"])
        .passes();

    assert!(!temp.join("build/country/stale.json").exists());
    assert!(temp.join("build/country/items/index.json").is_file());
}

#[test]
fn build_needs_ready_register() {
    let temp = Project::empty();
    temp.file("empty.rsf", "");

    temp.registers()
        .args(&["build", "--rsf", "empty.rsf"])
        .fails()
        .stderr_has("is not ready");
    assert!(!temp.join("build").exists());
}
