// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! RSF command types

use crate::entry::Entry;
use crate::hash::ItemHash;
use crate::item::Item;
use std::fmt;
use std::str::FromStr;

/// The operation a command performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AddItem,
    AppendEntry,
    AssertRootHash,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::AddItem => "add-item",
            Action::AppendEntry => "append-entry",
            Action::AssertRootHash => "assert-root-hash",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add-item" => Ok(Action::AddItem),
            "append-entry" => Ok(Action::AppendEntry),
            "assert-root-hash" => Ok(Action::AssertRootHash),
            _ => Err(()),
        }
    }
}

/// An atomic, immutable log instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddItem(Item),
    AppendEntry(Entry),
    AssertRootHash(ItemHash),
}

impl Command {
    pub fn action(&self) -> Action {
        match self {
            Command::AddItem(_) => Action::AddItem,
            Command::AppendEntry(_) => Action::AppendEntry,
            Command::AssertRootHash(_) => Action::AssertRootHash,
        }
    }

    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Command::AppendEntry(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Tab separated line form, without the trailing newline
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddItem(item) => write!(f, "{}\t{}", Action::AddItem, item),
            Command::AppendEntry(entry) => {
                let hashes: Vec<String> =
                    entry.item_hashes.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "{}\t{}\t{}\t{}\t{}",
                    Action::AppendEntry,
                    entry.scope,
                    entry.key,
                    entry.timestamp,
                    hashes.join(";")
                )
            }
            Command::AssertRootHash(hash) => write!(f, "{}\t{}", Action::AssertRootHash, hash),
        }
    }
}
