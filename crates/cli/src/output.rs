// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Values that can be rendered as a CSV table
pub trait Tabular {
    fn to_csv(&self) -> String;
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display + Tabular>(
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Csv => print!("{}", value.to_csv()),
    }
    Ok(())
}
