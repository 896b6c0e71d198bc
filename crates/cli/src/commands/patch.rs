// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! `registers patch`: create and apply patches

use super::ready_register;
use crate::config::Config;
use crate::error::RegistersError;
use anyhow::Context;
use clap::{Args, Subcommand};
use registers_core::{rsf, validator, xsv, Applied, Patch, RsfLog, Timestamp, XsvError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct PatchArgs {
    #[command(subcommand)]
    pub command: PatchCommand,
}

#[derive(Subcommand, Debug)]
pub enum PatchCommand {
    /// Create an RSF patch from a CSV or TSV file
    ///
    /// The column delimiter is detected from the header. `;` cannot be used
    /// as a delimiter: it separates the values of cardinality `n` fields.
    Create {
        /// CSV or TSV file with a header row
        xsv: PathBuf,
        /// RSF file with the register's metadata
        #[arg(long)]
        rsf: Option<PathBuf>,
        /// RFC3339 timestamp for every entry in the patch (defaults to now)
        #[arg(long)]
        timestamp: Option<Timestamp>,
        /// Append the patch to the RSF file instead of printing it
        #[arg(long)]
        apply: bool,
    },
    /// Apply an RSF patch file to the register
    Apply {
        /// RSF patch file
        patch: PathBuf,
        /// RSF file to append to
        #[arg(long)]
        rsf: Option<PathBuf>,
    },
}

pub fn handle(command: PatchCommand, config: &Config) -> anyhow::Result<()> {
    match command {
        PatchCommand::Create {
            xsv,
            rsf,
            timestamp,
            apply,
        } => create(&xsv, config.rsf_path(rsf)?, timestamp, apply),
        PatchCommand::Apply { patch, rsf } => apply_file(&patch, config.rsf_path(rsf)?),
    }
}

fn create(
    xsv_path: &Path,
    rsf_path: PathBuf,
    timestamp: Option<Timestamp>,
    apply: bool,
) -> anyhow::Result<()> {
    let (log, register) = ready_register(&rsf_path)?;

    let text = std::fs::read_to_string(xsv_path)
        .with_context(|| format!("failed to read {}", xsv_path.display()))?;
    let items = match xsv::deserialize(&text, register.schema()) {
        Ok(items) => items,
        Err(XsvError::Rows(rows)) => {
            return Err(RegistersError::invalid_rows(xsv_path, &rows).into());
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("failed to read {}", xsv_path.display())));
        }
    };

    let timestamp = timestamp.unwrap_or_else(Timestamp::now);
    let patch = Patch::from_items(&items, &register, timestamp)?;
    let applied =
        validator::apply(&patch, &register).map_err(|e| RegistersError::validation_failed(&e))?;

    if apply {
        commit(&log, &applied)
    } else {
        tracing::info!(
            commands = applied.commands.len(),
            xsv = %xsv_path.display(),
            "created patch"
        );
        print!("{}", rsf::serialize(&applied.commands));
        Ok(())
    }
}

fn apply_file(patch_path: &Path, rsf_path: PathBuf) -> anyhow::Result<()> {
    let (log, register) = ready_register(&rsf_path)?;

    let file = File::open(patch_path)
        .with_context(|| format!("failed to open {}", patch_path.display()))?;
    let commands = rsf::parse(BufReader::new(file))
        .with_context(|| format!("invalid patch {}", patch_path.display()))?;
    let patch = Patch::from_commands(commands)?;

    let applied =
        validator::apply(&patch, &register).map_err(|e| RegistersError::validation_failed(&e))?;
    commit(&log, &applied)
}

/// Append accepted commands; only reached after validation succeeds
fn commit(log: &RsfLog, applied: &Applied) -> anyhow::Result<()> {
    let count = log.append(&applied.commands)?;
    println!("Appended {} commands to {}", count, log.path().display());
    Ok(())
}
