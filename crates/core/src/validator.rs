// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Patch validation and application
//!
//! Commands are checked in order against a staged copy of the register, so
//! an entry may refer to an item added earlier in the same patch. Every
//! problem in every command is collected. The staged register is returned
//! only when there are none; the caller's register is never modified.

use crate::entry::{Entry, Scope};
use crate::hash::ItemHash;
use crate::patch::Patch;
use crate::register::{Register, ReplayReason};
use crate::rsf::{Action, Command};
use crate::schema::{is_valid_key, SchemaError, Violation};
use crate::timestamp::Timestamp;
use std::fmt;

/// Result of applying a patch
pub type ApplyResult = Result<Applied, ValidationErrors>;

/// A patch that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// State after the patch
    pub register: Register,
    /// Commands to commit, in order
    pub commands: Vec<Command>,
}

/// Collection of validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Patch validation failed with {} error(s):",
            self.errors.len()
        )?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}: {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A problem with one patch command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// 1-based position of the command in the patch
    pub command: usize,
    pub action: Action,
    pub kind: ValidationErrorKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command {} ({}): {}", self.command, self.action, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// User entry before the schema is defined
    SchemaNotReady { key: String },
    /// Entry references an item neither in the register nor the patch
    MissingItem { key: String, hash: ItemHash },
    /// Entry timestamp earlier than the key's current entry
    OutOfOrder {
        key: String,
        timestamp: Timestamp,
        current: Timestamp,
    },
    /// Same hash, different content
    DuplicateItem { hash: ItemHash },
    /// Malformed system record
    InvalidMetadata(SchemaError),
    /// Item does not conform to the schema
    Violation { key: String, violation: Violation },
    /// Item's primary-key value differs from the entry key
    KeyMismatch { key: String, value: String },
    /// Entry key is not a valid register key
    InvalidKey { key: String },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::SchemaNotReady { key } => write!(
                f,
                "entry for '{}' cannot be applied before the schema is ready",
                key
            ),
            ValidationErrorKind::MissingItem { key, hash } => {
                write!(f, "entry for '{}' references unknown item {}", key, hash)
            }
            ValidationErrorKind::OutOfOrder {
                key,
                timestamp,
                current,
            } => write!(
                f,
                "entry for '{}' at {} is earlier than its current entry at {}",
                key, timestamp, current
            ),
            ValidationErrorKind::DuplicateItem { hash } => {
                write!(f, "item {} already exists with different content", hash)
            }
            ValidationErrorKind::InvalidMetadata(err) => write!(f, "{}", err),
            ValidationErrorKind::Violation { key, violation } => {
                write!(f, "entry '{}': {}", key, violation)
            }
            ValidationErrorKind::KeyMismatch { key, value } => write!(
                f,
                "entry key '{}' does not match the item's primary key '{}'",
                key, value
            ),
            ValidationErrorKind::InvalidKey { key } => write!(f, "invalid key '{}'", key),
        }
    }
}

impl From<ReplayReason> for ValidationErrorKind {
    fn from(reason: ReplayReason) -> Self {
        match reason {
            ReplayReason::SchemaNotReady { key } => ValidationErrorKind::SchemaNotReady { key },
            ReplayReason::OutOfOrder {
                key,
                timestamp,
                current,
            } => ValidationErrorKind::OutOfOrder {
                key,
                timestamp,
                current,
            },
            ReplayReason::DuplicateItem { hash } => ValidationErrorKind::DuplicateItem { hash },
            ReplayReason::MissingItem { key, hash } => {
                ValidationErrorKind::MissingItem { key, hash }
            }
            ReplayReason::InvalidMetadata(err) => ValidationErrorKind::InvalidMetadata(err),
        }
    }
}

/// Validate a patch against a register and apply it to a copy
pub fn apply(patch: &Patch, register: &Register) -> ApplyResult {
    let mut staged = register.clone();
    let mut errors = Vec::new();

    for (index, command) in patch.commands().iter().enumerate() {
        let mut kinds = match command {
            Command::AppendEntry(entry) if entry.scope == Scope::User => {
                check_user_entry(entry, &staged)
            }
            _ => Vec::new(),
        };

        // A command that fails its own checks is not applied
        if kinds.is_empty() {
            if let Err(reason) = staged.apply_command(command) {
                kinds.push(reason.into());
            }
        }

        errors.extend(kinds.into_iter().map(|kind| ValidationError {
            command: index + 1,
            action: command.action(),
            kind,
        }));
    }

    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "patch rejected");
        return Err(ValidationErrors { errors });
    }

    tracing::debug!(
        commands = patch.len(),
        entries = staged.entries().len() - register.entries().len(),
        "patch validated"
    );
    Ok(Applied {
        register: staged,
        commands: patch.commands().to_vec(),
    })
}

/// Key and item conformance checks for a user entry
fn check_user_entry(entry: &Entry, staged: &Register) -> Vec<ValidationErrorKind> {
    let mut kinds = Vec::new();

    if !is_valid_key(&entry.key) {
        kinds.push(ValidationErrorKind::InvalidKey {
            key: entry.key.clone(),
        });
    }

    let schema = staged.schema();
    let Some(primary_key) = schema.primary_key().filter(|_| schema.is_ready()) else {
        // Reported by replay
        return kinds;
    };

    for item in entry.item_hashes.iter().filter_map(|h| staged.item(h)) {
        for violation in schema.conform(item) {
            kinds.push(ValidationErrorKind::Violation {
                key: entry.key.clone(),
                violation,
            });
        }
        if let Some(value) = item.get_str(primary_key) {
            if value != entry.key {
                kinds.push(ValidationErrorKind::KeyMismatch {
                    key: entry.key.clone(),
                    value: value.to_string(),
                });
            }
        }
    }

    kinds
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
