// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Entries: timestamped assignments of a key to one or more items

use crate::hash::ItemHash;
use crate::timestamp::Timestamp;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which log an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    /// Register data
    User,
    /// Register metadata (name, fields, custodian, ...)
    System,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::System => "system",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Scope::User),
            "system" => Ok(Scope::System),
            other => Err(format!("unknown scope '{}'", other)),
        }
    }
}

/// A timestamped association of a key with its current item(s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub scope: Scope,
    pub key: String,
    pub timestamp: Timestamp,
    pub item_hashes: Vec<ItemHash>,
}

impl Entry {
    pub fn new(
        scope: Scope,
        key: impl Into<String>,
        timestamp: Timestamp,
        item_hashes: Vec<ItemHash>,
    ) -> Self {
        Self {
            scope,
            key: key.into(),
            timestamp,
            item_hashes,
        }
    }

    pub fn user(key: impl Into<String>, timestamp: Timestamp, item_hash: ItemHash) -> Self {
        Self::new(Scope::User, key, timestamp, vec![item_hash])
    }

    pub fn system(key: impl Into<String>, timestamp: Timestamp, item_hash: ItemHash) -> Self {
        Self::new(Scope::System, key, timestamp, vec![item_hash])
    }

    /// Serializable form of the entry at the given 1-based position
    pub fn view(&self, number: usize) -> EntryView<'_> {
        EntryView {
            index_entry_number: number.to_string(),
            entry_number: number.to_string(),
            entry_timestamp: self.timestamp.as_str(),
            key: &self.key,
            item_hash: &self.item_hashes,
        }
    }

    /// JSON form of the entry at the given 1-based position, used as a Merkle leaf
    pub fn to_json(&self, number: usize) -> String {
        serde_json::to_string(&[self.view(number)]).unwrap_or_default()
    }
}

/// Published shape of an entry
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntryView<'a> {
    pub index_entry_number: String,
    pub entry_number: String,
    pub entry_timestamp: &'a str,
    pub key: &'a str,
    pub item_hash: &'a [ItemHash],
}

impl EntryView<'_> {
    pub const HEADERS: [&'static str; 5] = [
        "index-entry-number",
        "entry-number",
        "entry-timestamp",
        "key",
        "item-hash",
    ];
}
