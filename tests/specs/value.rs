//! Value specs
//!
//! Verify single tokens are checked against a datatype.

use crate::prelude::*;

#[test]
fn valid_period() {
    let temp = Project::empty();

    temp.registers()
        .args(&["value", "validate", "--type", "period", "P2Y"])
        .passes()
        .stdout_eq("'P2Y' is a valid 'period'.\n");
}

#[test]
fn invalid_curie() {
    let temp = Project::empty();

    temp.registers()
        .args(&["value", "validate", "--type", "curie", "not a curie"])
        .fails()
        .stderr_has("error: 'not a curie' is not a valid 'curie'");
}

#[test]
fn unknown_datatype() {
    let temp = Project::empty();

    temp.registers()
        .args(&["value", "validate", "--type", "float", "1.5"])
        .fails()
        .stderr_has("unknown datatype 'float'");
}

#[test]
fn value_needs_no_register() {
    let temp = Project::empty();
    temp.file("registers.toml", "rsf = \"missing.rsf\"\n");

    temp.registers()
        .args(&["value", "validate", "--type", "integer", "42"])
        .passes();
}
