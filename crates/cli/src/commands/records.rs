// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! `registers records`: current records, one record, or a key's history

use super::ready_register;
use crate::config::Config;
use crate::error::RegistersError;
use crate::output::{self, OutputFormat, Tabular};
use clap::Args;
use registers_core::{xsv, Item, Record};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// Show only this key
    pub key: Option<String>,
    /// Show every entry for the key, oldest first
    #[arg(long, requires = "key")]
    pub history: bool,
    /// RSF file to read
    #[arg(long)]
    pub rsf: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct RecordView {
    pub entry_number: usize,
    pub entry_timestamp: String,
    pub key: String,
    pub item: Vec<Item>,
}

impl From<Record> for RecordView {
    fn from(record: Record) -> Self {
        Self {
            entry_number: record.entry_number,
            entry_timestamp: record.entry.timestamp.to_string(),
            key: record.entry.key,
            item: record.items,
        }
    }
}

#[derive(Serialize)]
#[serde(transparent)]
struct RecordList {
    records: Vec<RecordView>,
    #[serde(skip)]
    fields: Vec<String>,
}

impl fmt::Display for RecordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            return write!(f, "No records");
        }
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let items: Vec<String> = record.item.iter().map(Item::canonical_json).collect();
            write!(
                f,
                "{:<6} {:<20} {:<16} {}",
                record.entry_number,
                record.entry_timestamp,
                record.key,
                items.join(" ")
            )?;
        }
        Ok(())
    }
}

impl Tabular for RecordList {
    fn to_csv(&self) -> String {
        let headers: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        xsv::serialize(&headers, self.records.iter().flat_map(|r| &r.item))
    }
}

pub fn handle(args: RecordsArgs, config: &Config) -> anyhow::Result<()> {
    let rsf = config.rsf_path(args.rsf)?;
    let (_, register) = ready_register(&rsf)?;

    let records: Vec<Record> = match (&args.key, args.history) {
        (Some(key), true) => register.history(key),
        (Some(key), false) => vec![register
            .record(key)
            .ok_or_else(|| RegistersError::record_not_found(key))?],
        (None, _) => register.records().collect(),
    };
    if let (Some(key), true) = (&args.key, records.is_empty()) {
        return Err(RegistersError::record_not_found(key).into());
    }

    let list = RecordList {
        records: records.into_iter().map(RecordView::from).collect(),
        fields: register
            .schema()
            .field_order()
            .into_iter()
            .map(str::to_string)
            .collect(),
    };
    output::print(&list, args.output)
}
