// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Register state materialized from RSF replay
//!
//! A [`Register`] is never edited in place by callers. It is rebuilt from a
//! command sequence with [`Register::build`], a strict left fold in which:
//!
//! - `add-item` inserts into the item table (idempotent for equal content)
//! - `append-entry` with `system` scope folds metadata into the schema
//! - `append-entry` with `user` scope updates the current record for its key
//! - `assert-root-hash` is recorded
//!
//! The first command that cannot be applied halts replay.

use crate::entry::{Entry, Scope};
use crate::hash::ItemHash;
use crate::item::Item;
use crate::merkle;
use crate::rsf::Command;
use crate::schema::{Schema, SchemaError};
use crate::timestamp::Timestamp;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a command could not be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayReason {
    #[error("user entry for '{key}' appended before the schema is ready")]
    SchemaNotReady { key: String },
    #[error("entry for '{key}' at {timestamp} is earlier than its current entry at {current}")]
    OutOfOrder {
        key: String,
        timestamp: Timestamp,
        current: Timestamp,
    },
    #[error("item {hash} already exists with different content")]
    DuplicateItem { hash: ItemHash },
    #[error("entry for '{key}' references unknown item {hash}")]
    MissingItem { key: String, hash: ItemHash },
    #[error(transparent)]
    InvalidMetadata(#[from] SchemaError),
}

/// Replay failure with the 1-based position of the offending command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("command {position}: {reason}")]
pub struct ReplayError {
    pub position: usize,
    pub reason: ReplayReason,
}

/// The current state of one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based position of the entry in its log
    pub entry_number: usize,
    pub entry: Entry,
    pub items: Vec<Item>,
}

/// Register size counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Stats {
    pub total_records: usize,
    pub total_entries: usize,
    pub total_items: usize,
    pub total_metadata_entries: usize,
}

/// One scope's entry log and its key index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Log {
    entries: Vec<Entry>,
    /// key -> index of its latest entry
    current: BTreeMap<String, usize>,
}

impl Log {
    fn current(&self, key: &str) -> Option<&Entry> {
        self.current.get(key).map(|&i| &self.entries[i])
    }

    fn append(&mut self, entry: Entry) {
        self.current.insert(entry.key.clone(), self.entries.len());
        self.entries.push(entry);
    }
}

/// Materialized register state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    schema: Schema,
    items: BTreeMap<ItemHash, Item>,
    log: Log,
    metalog: Log,
    root_hashes: Vec<ItemHash>,
    command_count: usize,
}

impl Register {
    /// An empty register with no schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay a command sequence from scratch
    pub fn build(commands: &[Command]) -> Result<Self, ReplayError> {
        let mut register = Self::new();
        for (index, command) in commands.iter().enumerate() {
            register
                .apply_command(command)
                .map_err(|reason| ReplayError {
                    position: index + 1,
                    reason,
                })?;
        }

        tracing::debug!(
            commands = register.command_count,
            entries = register.log.entries.len(),
            items = register.items.len(),
            ready = register.is_ready(),
            "replayed register"
        );
        Ok(register)
    }

    /// Fold one command into the state
    ///
    /// Nothing is changed when an error is returned.
    pub(crate) fn apply_command(&mut self, command: &Command) -> Result<(), ReplayReason> {
        match command {
            Command::AddItem(item) => self.add_item(item)?,
            Command::AppendEntry(entry) => self.append_entry(entry)?,
            Command::AssertRootHash(hash) => self.root_hashes.push(hash.clone()),
        }
        self.command_count += 1;
        Ok(())
    }

    fn add_item(&mut self, item: &Item) -> Result<(), ReplayReason> {
        let hash = item.hash();
        match self.items.get(&hash) {
            Some(existing) if existing != item => Err(ReplayReason::DuplicateItem { hash }),
            Some(_) => Ok(()),
            None => {
                self.items.insert(hash, item.clone());
                Ok(())
            }
        }
    }

    fn append_entry(&mut self, entry: &Entry) -> Result<(), ReplayReason> {
        if entry.scope == Scope::User && !self.schema.is_ready() {
            return Err(ReplayReason::SchemaNotReady {
                key: entry.key.clone(),
            });
        }

        for hash in &entry.item_hashes {
            if !self.items.contains_key(hash) {
                return Err(ReplayReason::MissingItem {
                    key: entry.key.clone(),
                    hash: hash.clone(),
                });
            }
        }

        let log = match entry.scope {
            Scope::User => &self.log,
            Scope::System => &self.metalog,
        };
        if let Some(current) = log.current(&entry.key) {
            // Same instant in another offset is not earlier
            if entry.timestamp.instant() < current.timestamp.instant() {
                return Err(ReplayReason::OutOfOrder {
                    key: entry.key.clone(),
                    timestamp: entry.timestamp.clone(),
                    current: current.timestamp.clone(),
                });
            }
        }

        match entry.scope {
            Scope::User => self.log.append(entry.clone()),
            Scope::System => {
                // Fold into a copy so a bad definition leaves the schema untouched
                let mut schema = self.schema.clone();
                for item in self.items_of(entry) {
                    schema.apply(&entry.key, item)?;
                }
                self.schema = schema;
                self.metalog.append(entry.clone());
            }
        }
        Ok(())
    }

    fn items_of<'a>(&'a self, entry: &'a Entry) -> impl Iterator<Item = &'a Item> + 'a {
        entry.item_hashes.iter().filter_map(|h| self.items.get(h))
    }

    fn record_at(&self, log: &Log, index: usize) -> Record {
        let entry = &log.entries[index];
        Record {
            entry_number: index + 1,
            entry: entry.clone(),
            items: self.items_of(entry).cloned().collect(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn is_ready(&self) -> bool {
        self.schema.is_ready()
    }

    pub fn name(&self) -> Option<&str> {
        self.schema.name()
    }

    /// User entries in log order
    pub fn entries(&self) -> &[Entry] {
        &self.log.entries
    }

    /// System entries in log order
    pub fn metadata_entries(&self) -> &[Entry] {
        &self.metalog.entries
    }

    pub fn items(&self) -> &BTreeMap<ItemHash, Item> {
        &self.items
    }

    pub fn item(&self, hash: &ItemHash) -> Option<&Item> {
        self.items.get(hash)
    }

    pub fn contains_item(&self, hash: &ItemHash) -> bool {
        self.items.contains_key(hash)
    }

    /// Items referenced by user entries, by hash
    pub fn user_items(&self) -> BTreeMap<&ItemHash, &Item> {
        self.log
            .entries
            .iter()
            .flat_map(|entry| &entry.item_hashes)
            .filter_map(|hash| self.items.get_key_value(hash))
            .collect()
    }

    /// Current record for a user key
    pub fn record(&self, key: &str) -> Option<Record> {
        self.log
            .current
            .get(key)
            .map(|&index| self.record_at(&self.log, index))
    }

    /// Current metadata record for a system key
    pub fn metadata_record(&self, key: &str) -> Option<Record> {
        self.metalog
            .current
            .get(key)
            .map(|&index| self.record_at(&self.metalog, index))
    }

    /// Every entry for a user key, oldest first
    pub fn history(&self, key: &str) -> Vec<Record> {
        (0..self.log.entries.len())
            .filter(|&i| self.log.entries[i].key == key)
            .map(|i| self.record_at(&self.log, i))
            .collect()
    }

    /// Current records in key order
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.log
            .current
            .values()
            .map(|&index| self.record_at(&self.log, index))
    }

    /// Number of commands replayed
    pub fn command_count(&self) -> usize {
        self.command_count
    }

    /// Root hashes asserted in the log, in order
    pub fn asserted_root_hashes(&self) -> &[ItemHash] {
        &self.root_hashes
    }

    /// Timestamp of the latest user entry, else of the latest system entry
    pub fn last_updated(&self) -> Option<&Timestamp> {
        self.log
            .entries
            .last()
            .or_else(|| self.metalog.entries.last())
            .map(|e| &e.timestamp)
    }

    /// Merkle root over the user entries
    pub fn root_hash(&self) -> ItemHash {
        merkle::root_hash(
            self.log
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| entry.to_json(i + 1)),
        )
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total_records: self.log.current.len(),
            total_entries: self.log.entries.len(),
            total_items: self.items.len(),
            total_metadata_entries: self.metalog.entries.len(),
        }
    }
}

#[cfg(test)]
#[path = "register_tests.rs"]
mod tests;
