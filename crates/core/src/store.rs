// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Append-only RSF log file
//!
//! Existing bytes are never rewritten: commits open the file in append mode
//! and fsync before returning.

use crate::register::{Register, ReplayError};
use crate::rsf::{self, Command, FormatError};
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or extending a log file
#[derive(Debug, Error)]
pub enum LogError {
    #[error("log file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("log file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("{}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
    #[error("{}: {source}", .path.display())]
    Replay {
        path: PathBuf,
        #[source]
        source: ReplayError,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// An RSF log on disk
#[derive(Debug, Clone)]
pub struct RsfLog {
    path: PathBuf,
}

impl RsfLog {
    /// Open an existing log
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(LogError::NotFound(path));
        }
        Ok(Self { path })
    }

    /// Create a new log holding `commands`, failing if the file exists
    pub fn create(path: impl AsRef<Path>, commands: &[Command]) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(LogError::AlreadyExists(path));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(rsf::serialize(commands).as_bytes())?;
        file.sync_all()?;

        tracing::info!(path = %path.display(), commands = commands.len(), "created log");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every command in the log
    pub fn read(&self) -> Result<Vec<Command>, LogError> {
        let file = File::open(&self.path)?;
        rsf::parse(BufReader::new(file)).map_err(|source| LogError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Read and replay the log
    pub fn load(&self) -> Result<Register, LogError> {
        let commands = self.read()?;
        Register::build(&commands).map_err(|source| LogError::Replay {
            path: self.path.clone(),
            source,
        })
    }

    /// Append commands to the end of the log, returning how many were written
    ///
    /// A missing final newline is completed first so the new commands start
    /// on their own line.
    pub fn append(&self, commands: &[Command]) -> Result<usize, LogError> {
        if commands.is_empty() {
            return Ok(0);
        }

        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        let mut text = String::new();
        if !ends_with_newline(&mut file)? {
            text.push('\n');
        }
        text.push_str(&rsf::serialize(commands));

        file.write_all(text.as_bytes())?;
        file.sync_all()?;

        tracing::info!(
            path = %self.path.display(),
            commands = commands.len(),
            "appended to log"
        );
        Ok(commands.len())
    }
}

/// Whether the file is empty or its last byte is a newline
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
