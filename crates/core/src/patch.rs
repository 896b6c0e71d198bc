// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Patches: timestamped batches of proposed commands
//!
//! A patch is built either from schema-conformant items (rows read from a
//! tabular file) or taken as-is from an RSF document. Building a patch never
//! touches the register; see [`crate::validator`] for applying one.

use crate::entry::Entry;
use crate::hash::ItemHash;
use crate::item::Item;
use crate::register::Register;
use crate::rsf::Command;
use crate::schema::{Attribute, Cardinality, Datatype};
use crate::timestamp::Timestamp;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("a patch must contain at least one command")]
    Empty,
    #[error("patch has no append-entry command to take its timestamp from")]
    MissingTimestamp,
    #[error("register schema is not ready")]
    SchemaNotReady,
    #[error("item {index} has no single value for primary key '{field}'")]
    MissingKey { index: usize, field: String },
}

/// An ordered batch of commands stamped with one timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    commands: Vec<Command>,
    timestamp: Timestamp,
}

impl Patch {
    /// Build a patch from items, keyed by the register's primary key
    ///
    /// Each item yields an `add-item` followed by a user `append-entry`, in
    /// input order. The `add-item` is left out when the register already
    /// holds the item or an earlier row of this patch added it.
    pub fn from_items(
        items: &[Item],
        register: &Register,
        timestamp: Timestamp,
    ) -> Result<Self, PatchError> {
        if items.is_empty() {
            return Err(PatchError::Empty);
        }
        let schema = register.schema();
        let primary_key = match schema.primary_key() {
            Some(pk) if schema.is_ready() => pk,
            _ => return Err(PatchError::SchemaNotReady),
        };

        let mut commands = Vec::with_capacity(items.len() * 2);
        let mut added: BTreeSet<ItemHash> = BTreeSet::new();

        for (index, item) in items.iter().enumerate() {
            let key = item
                .get_str(primary_key)
                .ok_or_else(|| PatchError::MissingKey {
                    index: index + 1,
                    field: primary_key.to_string(),
                })?;

            let hash = item.hash();
            if !register.contains_item(&hash) && added.insert(hash.clone()) {
                commands.push(Command::AddItem(item.clone()));
            }
            commands.push(Command::AppendEntry(Entry::user(
                key,
                timestamp.clone(),
                hash,
            )));
        }

        tracing::debug!(
            items = items.len(),
            commands = commands.len(),
            %timestamp,
            "built patch from items"
        );
        Ok(Self {
            commands,
            timestamp,
        })
    }

    /// Take an existing command sequence as a patch, unchanged
    ///
    /// The patch timestamp is that of its first `append-entry`.
    pub fn from_commands(commands: Vec<Command>) -> Result<Self, PatchError> {
        if commands.is_empty() {
            return Err(PatchError::Empty);
        }
        let timestamp = commands
            .iter()
            .find_map(Command::as_entry)
            .map(|entry| entry.timestamp.clone())
            .ok_or(PatchError::MissingTimestamp)?;

        Ok(Self {
            commands,
            timestamp,
        })
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Definition of a new register, turned into its bootstrap commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    name: String,
    fields: Vec<Attribute>,
    description: Option<String>,
    custodian: Option<String>,
}

impl Bootstrap {
    /// A register whose primary key is a string field named after it
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            fields: vec![Attribute::new(&name, Datatype::String, Cardinality::One)],
            name,
            description: None,
            custodian: None,
        }
    }

    /// Add or redefine a field
    pub fn field(mut self, attribute: Attribute) -> Self {
        match self.fields.iter_mut().find(|a| a.field == attribute.field) {
            Some(existing) => *existing = attribute,
            None => self.fields.push(attribute),
        }
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn custodian(mut self, custodian: impl Into<String>) -> Self {
        self.custodian = Some(custodian.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bootstrap patch: empty root assertion, then `name`, the field
    /// definitions, the `register:` record and the custodian, each as an
    /// `add-item` and its system `append-entry`
    pub fn patch(&self, timestamp: Timestamp) -> Patch {
        let mut commands = vec![Command::AssertRootHash(ItemHash::empty())];
        let mut system = |key: String, item: Item| {
            let hash = item.hash();
            commands.push(Command::AddItem(item));
            commands.push(Command::AppendEntry(Entry::system(
                key,
                timestamp.clone(),
                hash,
            )));
        };

        system(
            "name".to_string(),
            Item::new().with("name", self.name.as_str()),
        );
        for attribute in &self.fields {
            system(format!("field:{}", attribute.field), attribute.to_item());
        }

        let mut register = Item::new()
            .with("register", self.name.as_str())
            .with(
                "fields",
                self.fields
                    .iter()
                    .map(|a| a.field.clone())
                    .collect::<Vec<_>>(),
            );
        if let Some(text) = &self.description {
            register.insert("text", text.as_str());
        }
        system(format!("register:{}", self.name), register);

        if let Some(custodian) = &self.custodian {
            system(
                "custodian".to_string(),
                Item::new().with("custodian", custodian.as_str()),
            );
        }

        Patch {
            commands,
            timestamp,
        }
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
