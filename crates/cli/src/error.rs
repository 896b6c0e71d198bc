// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! User-friendly error display with context and suggestions.
//!
//! Each error says what went wrong, why it might have happened, and how to
//! fix it.

use registers_core::{Datatype, RowErrors, ValidationErrors};
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct RegistersError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl RegistersError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

impl fmt::Display for RegistersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for RegistersError {}

/// Common error builders for typical failure scenarios.
impl RegistersError {
    /// No log path from flag, environment or config file.
    pub fn rsf_not_configured() -> Self {
        RegistersError::new("No RSF file given")
            .with_suggestion("Pass one with: --rsf <file>")
            .with_suggestion("Set REGISTERS_RSF in the environment")
            .with_suggestion("Add `rsf = \"<file>\"` to registers.toml")
    }

    /// The register has no usable schema yet.
    pub fn schema_not_ready(rsf: &Path) -> Self {
        RegistersError::new(format!("Register in {} is not ready", rsf.display()))
            .with_context("Its name or primary-key field definition is missing")
            .with_suggestion("Create a register with: registers init <name> --rsf <file>")
    }

    /// Init target already exists.
    pub fn rsf_exists(rsf: &Path) -> Self {
        RegistersError::new(format!("{} already exists", rsf.display()))
            .with_context("init never overwrites an existing log")
            .with_suggestion("Choose a file that does not exist")
    }

    /// Tabular input had bad rows.
    pub fn invalid_rows(xsv: &Path, rows: &RowErrors) -> Self {
        let err = RegistersError::new(format!(
            "{} has {} invalid row(s)",
            xsv.display(),
            rows.errors.len()
        ));
        rows.errors
            .iter()
            .fold(err, |err, row| err.with_context(row.to_string()))
            .with_suggestion("Fix the rows listed above and run the command again")
    }

    /// Patch failed validation; nothing was written.
    pub fn validation_failed(errors: &ValidationErrors) -> Self {
        let err = RegistersError::new(format!(
            "Patch rejected with {} validation error(s)",
            errors.errors.len()
        ));
        errors
            .errors
            .iter()
            .fold(err, |err, e| err.with_context(e.to_string()))
            .with_suggestion("Nothing was appended; fix every error and apply again")
    }

    /// A token did not coerce to its datatype.
    pub fn invalid_value(token: &str, datatype: Datatype) -> Self {
        RegistersError::new(format!("'{}' is not a valid '{}'", token, datatype))
            .with_suggestion("List the accepted forms with: registers value validate --help")
    }

    /// Blob text is not a JSON object of strings and string lists.
    pub fn malformed_blob(err: impl fmt::Display) -> Self {
        RegistersError::new("The given blob is not well formed JSON")
            .with_context(err.to_string())
    }

    /// Blob does not conform to the register schema.
    pub fn invalid_blob(register: &str, violations: &[String]) -> Self {
        let err = RegistersError::new(format!(
            "Blob is not valid for the '{}' register: {} violation(s)",
            register,
            violations.len()
        ));
        violations
            .iter()
            .fold(err, |err, v| err.with_context(v.as_str()))
            .with_suggestion("Show the register fields with: registers context")
    }

    /// No current record for a key.
    pub fn record_not_found(key: &str) -> Self {
        RegistersError::new(format!("Record '{}' not found", key))
            .with_suggestion("List current records: registers records")
    }
}
