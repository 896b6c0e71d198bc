// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! `registers init`: create a new register

use crate::config::Config;
use crate::error::RegistersError;
use clap::Args;
use registers_core::schema::is_valid_key;
use registers_core::{Attribute, Bootstrap, Cardinality, Datatype, LogError, RsfLog, Timestamp};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Register name, also the primary-key field
    pub name: String,
    /// RSF file to create (defaults to `<name>.rsf`)
    #[arg(long)]
    pub rsf: Option<PathBuf>,
    /// Extra field as `id:datatype[:cardinality]`, e.g. `borders:curie:n`
    #[arg(long = "field", value_parser = parse_field)]
    pub fields: Vec<Attribute>,
    /// Register description
    #[arg(long)]
    pub description: Option<String>,
    /// Who maintains the register
    #[arg(long)]
    pub custodian: Option<String>,
    /// RFC3339 timestamp for the bootstrap entries (defaults to now)
    #[arg(long)]
    pub timestamp: Option<Timestamp>,
}

/// Parse `id:datatype[:cardinality]`
pub fn parse_field(field: &str) -> Result<Attribute, String> {
    let mut parts = field.split(':');
    let (Some(id), Some(datatype)) = (parts.next(), parts.next()) else {
        return Err(format!("expected id:datatype[:cardinality], got '{}'", field));
    };
    if !is_valid_key(id) {
        return Err(format!("invalid field id '{}'", id));
    }
    let datatype: Datatype = datatype.parse()?;
    let cardinality: Cardinality = match parts.next() {
        Some(cardinality) => cardinality.parse()?,
        None => Cardinality::One,
    };
    if parts.next().is_some() {
        return Err(format!("expected id:datatype[:cardinality], got '{}'", field));
    }
    Ok(Attribute::new(id, datatype, cardinality))
}

pub fn handle(args: InitArgs, config: &Config) -> anyhow::Result<()> {
    if !is_valid_key(&args.name) {
        return Err(RegistersError::new(format!("Invalid register name '{}'", args.name))
            .with_context("Names start with a letter or digit and use only letters, digits and _./-")
            .into());
    }

    let rsf = args
        .rsf
        .or_else(|| config.rsf.clone())
        .unwrap_or_else(|| PathBuf::from(format!("{}.rsf", args.name)));

    let mut bootstrap = Bootstrap::new(&args.name);
    for field in args.fields {
        bootstrap = bootstrap.field(field);
    }
    if let Some(description) = args.description {
        bootstrap = bootstrap.description(description);
    }
    if let Some(custodian) = args.custodian {
        bootstrap = bootstrap.custodian(custodian);
    }

    let patch = bootstrap.patch(args.timestamp.unwrap_or_else(Timestamp::now));
    match RsfLog::create(&rsf, patch.commands()) {
        Ok(_) => {}
        Err(LogError::AlreadyExists(path)) => return Err(RegistersError::rsf_exists(&path).into()),
        Err(err) => return Err(err.into()),
    }

    println!(
        "Created register '{}' at {} ({} commands)",
        bootstrap.name(),
        rsf.display(),
        patch.len()
    );
    Ok(())
}
