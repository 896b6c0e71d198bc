// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! `registers value`: check single tokens against a datatype

use crate::error::RegistersError;
use clap::{Args, Subcommand};
use registers_core::Datatype;

#[derive(Args, Debug)]
pub struct ValueArgs {
    #[command(subcommand)]
    pub command: ValueCommand,
}

#[derive(Subcommand, Debug)]
pub enum ValueCommand {
    /// Check that a token conforms to a datatype, e.g. `--type period P2Y`
    Validate {
        token: String,
        /// Expected datatype: curie, datetime, hash, integer, name, period,
        /// string, text, timestamp or url
        #[arg(long = "type")]
        datatype: Datatype,
    },
}

pub fn handle(command: ValueCommand) -> anyhow::Result<()> {
    match command {
        ValueCommand::Validate { token, datatype } => {
            validate(&token, datatype)?;
            println!("'{}' is a valid '{}'.", token, datatype);
            Ok(())
        }
    }
}

fn validate(token: &str, datatype: Datatype) -> Result<(), RegistersError> {
    datatype
        .coerce("value", token)
        .map(|_| ())
        .map_err(|_| RegistersError::invalid_value(token, datatype))
}
