// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! registers-core: the register replay and patch engine
//!
//! This crate provides:
//! - The RSF command log codec and an append-only log file
//! - Schema derivation from system entries and datatype coercion
//! - Tabular (CSV/TSV) deserialization into items
//! - Register replay, patch building and all-or-nothing patch validation
//! - RFC 6962 Merkle root hashes

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod hash;
pub mod item;
pub mod merkle;
pub mod timestamp;

// Log model (order matters for dependencies)
pub mod entry;
pub mod rsf;
pub mod schema;
pub mod xsv;
pub mod register;
pub mod patch;
pub mod validator;
pub mod store;

// Re-exports
pub use entry::{Entry, EntryView, Scope};
pub use hash::{HashError, ItemHash};
pub use item::{Item, Value};
pub use patch::{Bootstrap, Patch, PatchError};
pub use register::{Record, Register, ReplayError, ReplayReason, Stats};
pub use rsf::{Action, Command, FormatError};
pub use schema::{Attribute, Cardinality, Datatype, Schema, SchemaError, TypeError, Violation};
pub use store::{LogError, RsfLog};
pub use timestamp::{Timestamp, TimestampError};
pub use validator::{apply, Applied, ValidationError, ValidationErrorKind, ValidationErrors};
pub use xsv::{RowError, RowErrorKind, RowErrors, XsvError};
