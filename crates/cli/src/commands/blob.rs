// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! `registers blob`: list and validate items

use super::ready_register;
use crate::config::Config;
use crate::error::RegistersError;
use crate::output::{self, OutputFormat, Tabular};
use clap::{Args, Subcommand};
use registers_core::schema::is_valid_key;
use registers_core::{xsv, Item, Register};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BlobArgs {
    #[command(subcommand)]
    pub command: BlobCommand,
}

#[derive(Subcommand, Debug)]
pub enum BlobCommand {
    /// List the items referenced by register entries
    List {
        /// RSF file to read
        #[arg(long)]
        rsf: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t)]
        output: OutputFormat,
    },
    /// Check a JSON blob against the register schema
    ///
    /// e.g. `registers blob validate --rsf country.rsf '{"country":"ZZ","name":"Zeta"}'`
    Validate {
        blob: String,
        /// RSF file with the register's metadata
        #[arg(long)]
        rsf: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(transparent)]
struct BlobList {
    items: BTreeMap<String, Item>,
    #[serde(skip)]
    fields: Vec<String>,
}

impl BlobList {
    fn of(register: &Register) -> Self {
        Self {
            items: register
                .user_items()
                .into_iter()
                .map(|(hash, item)| (hash.to_string(), item.clone()))
                .collect(),
            fields: register
                .schema()
                .field_order()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl fmt::Display for BlobList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return write!(f, "No blobs");
        }
        for (i, (hash, item)) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {}", hash, item.canonical_json())?;
        }
        Ok(())
    }
}

impl Tabular for BlobList {
    fn to_csv(&self) -> String {
        let headers: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        xsv::serialize(&headers, self.items.values())
    }
}

pub fn handle(command: BlobCommand, config: &Config) -> anyhow::Result<()> {
    match command {
        BlobCommand::List { rsf, output } => {
            let (_, register) = ready_register(&config.rsf_path(rsf)?)?;
            output::print(&BlobList::of(&register), output)
        }
        BlobCommand::Validate { blob, rsf } => {
            let (_, register) = ready_register(&config.rsf_path(rsf)?)?;
            let item = validate(&blob, &register)?;
            println!(
                "'{}' is valid for the '{}' register.",
                item.canonical_json(),
                register.name().unwrap_or_default()
            );
            Ok(())
        }
    }
}

fn validate(blob: &str, register: &Register) -> Result<Item, RegistersError> {
    let item = Item::from_json(blob).map_err(RegistersError::malformed_blob)?;
    let schema = register.schema();

    let mut violations: Vec<String> = schema
        .conform(&item)
        .iter()
        .map(ToString::to_string)
        .collect();
    if let Some(key) = schema.primary_key().and_then(|pk| item.get_str(pk)) {
        if !is_valid_key(key) {
            violations.push(format!("invalid key '{}'", key));
        }
    }

    if violations.is_empty() {
        Ok(item)
    } else {
        Err(RegistersError::invalid_blob(
            register.name().unwrap_or_default(),
            &violations,
        ))
    }
}
