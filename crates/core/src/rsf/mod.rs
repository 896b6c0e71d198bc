// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Register Serialisation Format (RSF)
//!
//! The flat, line-oriented log that is a register's source of truth. Each
//! line holds one tab separated command:
//!
//! ```text
//! assert-root-hash  sha-256:<digest>
//! add-item          {"field":"value",...}
//! append-entry      <scope>  <key>  <timestamp>  sha-256:<digest>[;...]
//! ```

mod command;
mod parser;

pub use command::{Action, Command};
pub use parser::{load, parse, parse_command, serialize, FormatError, LineError};
