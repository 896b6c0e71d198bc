// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! `registers context`: register metadata and counts

use super::ready_register;
use crate::config::Config;
use crate::output::{self, OutputFormat, Tabular};
use clap::Args;
use registers_core::{xsv, Item, Register};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ContextArgs {
    /// RSF file to read
    #[arg(long)]
    pub rsf: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct Context {
    name: Option<String>,
    description: Option<String>,
    custodian: Option<String>,
    fields: Vec<String>,
    total_records: usize,
    total_entries: usize,
    total_items: usize,
    last_updated: Option<String>,
    root_hash: String,
}

impl Context {
    fn of(register: &Register) -> Self {
        let schema = register.schema();
        let stats = register.stats();
        Self {
            name: schema.name().map(str::to_string),
            description: schema.description().map(str::to_string),
            custodian: schema.custodian().map(str::to_string),
            fields: schema.field_order().into_iter().map(str::to_string).collect(),
            total_records: stats.total_records,
            total_entries: stats.total_entries,
            total_items: stats.total_items,
            last_updated: register.last_updated().map(ToString::to_string),
            root_hash: register.root_hash().to_string(),
        }
    }

    /// Label/value pairs in display order, skipping unset values
    fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        let optional = [
            ("name", &self.name),
            ("description", &self.description),
            ("custodian", &self.custodian),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                rows.push((label, value.clone()));
            }
        }
        rows.push(("fields", self.fields.join(";")));
        rows.push(("total-records", self.total_records.to_string()));
        rows.push(("total-entries", self.total_entries.to_string()));
        rows.push(("total-items", self.total_items.to_string()));
        if let Some(last_updated) = &self.last_updated {
            rows.push(("last-updated", last_updated.clone()));
        }
        rows.push(("root-hash", self.root_hash.clone()));
        rows
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        for (i, (label, value)) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<14} {}", format!("{}:", label), value)?;
        }
        Ok(())
    }
}

impl Tabular for Context {
    fn to_csv(&self) -> String {
        let rows = self.rows();
        let headers: Vec<&str> = rows.iter().map(|(label, _)| *label).collect();
        let item: Item = rows.iter().map(|(label, value)| (*label, value.clone())).collect();
        xsv::serialize(&headers, [&item])
    }
}

pub fn handle(args: ContextArgs, config: &Config) -> anyhow::Result<()> {
    let rsf = config.rsf_path(args.rsf)?;
    let (_, register) = ready_register(&rsf)?;
    output::print(&Context::of(&register), args.output)
}
