// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! RSF line parser and serializer
//!
//! Every non-blank line must be a well formed command. A bad line never
//! marks a truncation point: the log is authoritative, so any malformed
//! line fails the whole parse.

use super::command::{Action, Command};
use crate::entry::{Entry, Scope};
use crate::hash::{HashError, ItemHash};
use crate::item::Item;
use crate::timestamp::{Timestamp, TimestampError};
use std::io::{self, BufRead};
use thiserror::Error;

/// Errors reading an RSF stream
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: LineError },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FormatError {
    /// Line number of a malformed command, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::Malformed { line, .. } => Some(*line),
            FormatError::Io(_) => None,
        }
    }
}

/// Why a single line failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("unknown command '{0}'")]
    UnknownAction(String),
    #[error("{action} expects {expected} field(s), found {found}")]
    FieldCount {
        action: Action,
        expected: usize,
        found: usize,
    },
    #[error("invalid item: {0}")]
    InvalidItem(String),
    #[error(transparent)]
    InvalidHash(#[from] HashError),
    #[error("{0}")]
    InvalidScope(String),
    #[error(transparent)]
    InvalidTimestamp(#[from] TimestampError),
    #[error("entry key is empty")]
    EmptyKey,
    #[error("line is not valid UTF-8")]
    Encoding,
}

/// Parse one command line (without its line terminator)
pub fn parse_command(line: &str) -> Result<Command, LineError> {
    let (action, rest) = match line.split_once('\t') {
        Some((action, rest)) => (action, Some(rest)),
        None => (line, None),
    };

    let action: Action = action
        .parse()
        .map_err(|_| LineError::UnknownAction(action.to_string()))?;

    let rest = rest.ok_or(LineError::FieldCount {
        action,
        expected: expected_fields(action),
        found: 0,
    })?;

    match action {
        Action::AddItem => Item::from_json(rest)
            .map(Command::AddItem)
            .map_err(|e| LineError::InvalidItem(e.to_string())),
        Action::AppendEntry => parse_entry(rest).map(Command::AppendEntry),
        Action::AssertRootHash => {
            let fields: Vec<&str> = rest.split('\t').collect();
            check_count(action, &fields)?;
            Ok(Command::AssertRootHash(fields[0].parse()?))
        }
    }
}

fn parse_entry(rest: &str) -> Result<Entry, LineError> {
    let fields: Vec<&str> = rest.split('\t').collect();
    check_count(Action::AppendEntry, &fields)?;

    let scope: Scope = fields[0].parse().map_err(LineError::InvalidScope)?;
    let key = fields[1];
    if key.is_empty() {
        return Err(LineError::EmptyKey);
    }
    let timestamp = Timestamp::parse(fields[2])?;
    let item_hashes = fields[3]
        .split(';')
        .map(str::parse)
        .collect::<Result<Vec<ItemHash>, _>>()?;

    Ok(Entry::new(scope, key, timestamp, item_hashes))
}

fn expected_fields(action: Action) -> usize {
    match action {
        Action::AddItem | Action::AssertRootHash => 1,
        Action::AppendEntry => 4,
    }
}

fn check_count(action: Action, fields: &[&str]) -> Result<(), LineError> {
    let expected = expected_fields(action);
    if fields.len() != expected {
        return Err(LineError::FieldCount {
            action,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

/// Parse an in-memory RSF document
pub fn load(text: &str) -> Result<Vec<Command>, FormatError> {
    parse(text.as_bytes())
}

/// Parse an RSF stream into its ordered commands
pub fn parse<R: BufRead>(mut reader: R) -> Result<Vec<Command>, FormatError> {
    let mut commands = Vec::new();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = std::str::from_utf8(&buf).map_err(|_| FormatError::Malformed {
            line: line_number,
            reason: LineError::Encoding,
        })?;
        let line = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);

        if line.is_empty() {
            continue;
        }

        let command = parse_command(line).map_err(|reason| FormatError::Malformed {
            line: line_number,
            reason,
        })?;
        commands.push(command);
    }

    tracing::debug!(commands = commands.len(), "parsed rsf");
    Ok(commands)
}

/// Serialize commands, one per line, each newline terminated
pub fn serialize(commands: &[Command]) -> String {
    let mut out = String::new();
    for command in commands {
        out.push_str(&command.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
