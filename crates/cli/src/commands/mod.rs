// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! CLI command implementations

pub mod blob;
pub mod build;
pub mod context;
pub mod init;
pub mod patch;
pub mod records;
pub mod value;

use crate::error::RegistersError;
use registers_core::{Register, RsfLog};
use std::path::Path;

/// Open a log and replay it, requiring a ready schema
pub fn ready_register(rsf: &Path) -> anyhow::Result<(RsfLog, Register)> {
    let log = RsfLog::open(rsf)?;
    let register = log.load()?;
    if !register.is_ready() {
        return Err(RegistersError::schema_not_ready(rsf).into());
    }
    tracing::debug!(
        path = %rsf.display(),
        commands = register.command_count(),
        "replayed register"
    );
    Ok((log, register))
}
