// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Content hashes in `algorithm:hexdigest` form

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The only algorithm registers use
pub const SHA256: &str = "sha-256";

/// Error parsing a hash value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("missing algorithm prefix in '{0}'")]
    MissingAlgorithm(String),
    #[error("unsupported hash algorithm '{0}'")]
    UnsupportedAlgorithm(String),
    #[error("invalid sha-256 digest '{0}'")]
    InvalidDigest(String),
}

/// A SHA-256 hash identifying an item
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemHash {
    digest: String,
}

impl ItemHash {
    /// Hash the given bytes
    pub fn of(bytes: &[u8]) -> Self {
        Self::from_raw(Sha256::digest(bytes).as_slice())
    }

    /// Wrap an already computed raw digest
    pub fn from_raw(raw: &[u8]) -> Self {
        let digest = raw.iter().map(|b| format!("{:02x}", b)).collect();
        Self { digest }
    }

    /// Hash of the empty byte string (the empty Merkle tree)
    pub fn empty() -> Self {
        Self::of(b"")
    }

    /// Lowercase hex digest without the algorithm prefix
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn algorithm(&self) -> &'static str {
        SHA256
    }
}

impl fmt::Display for ItemHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", SHA256, self.digest)
    }
}

impl FromStr for ItemHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algorithm, digest) = s
            .split_once(':')
            .ok_or_else(|| HashError::MissingAlgorithm(s.to_string()))?;

        if algorithm != SHA256 {
            return Err(HashError::UnsupportedAlgorithm(algorithm.to_string()));
        }

        let is_hex = digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if digest.len() != 64 || !is_hex {
            return Err(HashError::InvalidDigest(digest.to_string()));
        }

        Ok(Self {
            digest: digest.to_string(),
        })
    }
}

impl Serialize for ItemHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
