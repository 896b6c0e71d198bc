// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! `registers build`: static files for serving a register read-only
//!
//! Writes `<out>/<name>/` with a JSON and a CSV file per resource:
//!
//! ```text
//! items/index          items/<hash>
//! entries/index        entries/<entry-number>
//! records/index        records/<key>        records/<key>/entries
//! ```

use super::ready_register;
use super::records::RecordView;
use crate::config::Config;
use anyhow::Context;
use clap::Args;
use registers_core::{xsv, Entry, EntryView, Item, Register};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const RECORD_HEADERS: [&str; 3] = ["entry-number", "entry-timestamp", "key"];

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// RSF file to read
    #[arg(long)]
    pub rsf: Option<PathBuf>,
    /// Directory to build into; the register gets its own subdirectory
    #[arg(long, default_value = "build")]
    pub out: PathBuf,
}

pub fn handle(args: BuildArgs, config: &Config) -> anyhow::Result<()> {
    let (_, register) = ready_register(&config.rsf_path(args.rsf)?)?;
    let name = register.name().unwrap_or_default();
    let root = args.out.join(name);

    if root.exists() {
        std::fs::remove_dir_all(&root)
            .with_context(|| format!("failed to clear {}", root.display()))?;
    }

    let mut site = Site { root, files: 0 };
    site.items(&register)?;
    site.entries(&register)?;
    site.records(&register)?;

    tracing::info!(path = %site.root.display(), files = site.files, "built register");
    println!(
        "Built register '{}' in {} ({} files)",
        name,
        site.root.display(),
        site.files
    );
    Ok(())
}

struct Site {
    root: PathBuf,
    files: usize,
}

impl Site {
    fn items(&mut self, register: &Register) -> anyhow::Result<()> {
        let fields = register.schema().field_order();
        let items = register.user_items();

        let index: BTreeMap<String, &Item> =
            items.iter().map(|(hash, item)| (hash.to_string(), *item)).collect();
        self.write(
            Path::new("items/index"),
            &index,
            xsv::serialize(&fields, items.values().copied()),
        )?;

        for (hash, item) in &items {
            self.write(
                &Path::new("items").join(hash.to_string()),
                item,
                xsv::serialize(&fields, [*item]),
            )?;
        }
        Ok(())
    }

    fn entries(&mut self, register: &Register) -> anyhow::Result<()> {
        let views: Vec<EntryView<'_>> = numbered(register.entries()).collect();
        let rows: Vec<Item> = views.iter().map(entry_row).collect();
        self.write(
            Path::new("entries/index"),
            &views,
            xsv::serialize(&EntryView::HEADERS, &rows),
        )?;

        for (view, row) in views.iter().zip(&rows) {
            self.write(
                &Path::new("entries").join(&view.entry_number),
                &[view],
                xsv::serialize(&EntryView::HEADERS, [row]),
            )?;
        }
        Ok(())
    }

    fn records(&mut self, register: &Register) -> anyhow::Result<()> {
        let mut headers: Vec<&str> = RECORD_HEADERS.to_vec();
        headers.extend(register.schema().field_order());

        let views: BTreeMap<String, RecordView> = register
            .records()
            .map(|record| (record.entry.key.clone(), RecordView::from(record)))
            .collect();
        let rows: Vec<Item> = views.values().flat_map(record_rows).collect();
        self.write(
            Path::new("records/index"),
            &views,
            xsv::serialize(&headers, &rows),
        )?;

        for (key, view) in &views {
            let dir = Path::new("records").join(key);
            let single = BTreeMap::from([(key, view)]);
            self.write(&dir, &single, xsv::serialize(&headers, &record_rows(view)))?;

            let trail: Vec<EntryView<'_>> = numbered(register.entries())
                .filter(|entry| entry.key == key.as_str())
                .collect();
            let rows: Vec<Item> = trail.iter().map(entry_row).collect();
            self.write(
                &dir.join("entries"),
                &trail,
                xsv::serialize(&EntryView::HEADERS, &rows),
            )?;
        }
        Ok(())
    }

    /// Write `<path>.json` and `<path>.csv` under the site root
    fn write<T: Serialize + ?Sized>(
        &mut self,
        path: &Path,
        json: &T,
        csv: String,
    ) -> anyhow::Result<()> {
        let base = self.root.join(path);
        if let Some(parent) = base.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut json = serde_json::to_string(json)?;
        json.push('\n');
        for (extension, content) in [("json", json), ("csv", csv)] {
            // Keys may contain dots, so append rather than set the extension
            let mut file = base.clone().into_os_string();
            file.push(".");
            file.push(extension);
            let file = PathBuf::from(file);
            std::fs::write(&file, content)
                .with_context(|| format!("failed to write {}", file.display()))?;
            self.files += 1;
        }
        Ok(())
    }
}

fn numbered(entries: &[Entry]) -> impl Iterator<Item = EntryView<'_>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.view(i + 1))
}

fn entry_row(view: &EntryView<'_>) -> Item {
    let hashes: Vec<String> = view.item_hash.iter().map(ToString::to_string).collect();
    Item::new()
        .with("index-entry-number", view.index_entry_number.as_str())
        .with("entry-number", view.entry_number.as_str())
        .with("entry-timestamp", view.entry_timestamp)
        .with("key", view.key)
        .with("item-hash", hashes)
}

/// One CSV row per item of the record
fn record_rows(view: &RecordView) -> Vec<Item> {
    view.item
        .iter()
        .map(|item| {
            let mut row = item.clone();
            row.insert("entry-number", view.entry_number.to_string());
            row.insert("entry-timestamp", view.entry_timestamp.as_str());
            row.insert("key", view.key.as_str());
            row
        })
        .collect()
}
