// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Datatypes and their coercion routines
//!
//! Every datatype maps to one coercion function through [`Datatype::coercer`].
//! A coercion trims the raw cell, checks it against the datatype's lexical
//! rules and returns the canonical string stored in the item.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Value failed to coerce to its declared datatype
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}': value '{value}' is not a valid {expected}")]
pub struct TypeError {
    pub field: String,
    pub value: String,
    pub expected: Datatype,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    Curie,
    Datetime,
    Hash,
    Integer,
    Name,
    Period,
    String,
    Text,
    Timestamp,
    Url,
}

/// A coercion routine: raw atom in, canonical atom out
pub type Coercer = fn(&str) -> Option<String>;

impl Datatype {
    pub const ALL: [Datatype; 10] = [
        Datatype::Curie,
        Datatype::Datetime,
        Datatype::Hash,
        Datatype::Integer,
        Datatype::Name,
        Datatype::Period,
        Datatype::String,
        Datatype::Text,
        Datatype::Timestamp,
        Datatype::Url,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Datatype::Curie => "curie",
            Datatype::Datetime => "datetime",
            Datatype::Hash => "hash",
            Datatype::Integer => "integer",
            Datatype::Name => "name",
            Datatype::Period => "period",
            Datatype::String => "string",
            Datatype::Text => "text",
            Datatype::Timestamp => "timestamp",
            Datatype::Url => "url",
        }
    }

    /// The coercion routine for this datatype
    pub fn coercer(&self) -> Coercer {
        match self {
            Datatype::Curie => coerce_curie,
            Datatype::Datetime => coerce_datetime,
            Datatype::Hash => coerce_hash,
            Datatype::Integer => coerce_integer,
            Datatype::Name => coerce_name,
            Datatype::Period => coerce_period,
            Datatype::String | Datatype::Text => coerce_text,
            Datatype::Timestamp => coerce_timestamp,
            Datatype::Url => coerce_url,
        }
    }

    /// Coerce a single raw atom for `field`
    pub fn coerce(&self, field: &str, raw: &str) -> Result<String, TypeError> {
        (self.coercer())(raw.trim()).ok_or_else(|| TypeError {
            field: field.to_string(),
            value: raw.to_string(),
            expected: *self,
        })
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Datatype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Datatype::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown datatype '{}'", s))
    }
}

static CURIE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-z][a-z\d-]*:[\w/.%-]*$"));
static DATETIME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\d{4}(-\d{2}(-\d{2}(T\d{2}(:\d{2}(:\d{2})?)?Z)?)?)?$"));
static NAME: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z][A-Za-z\d-]*$"));
static HASH: LazyLock<Regex> = LazyLock::new(|| compile(r"^sha-256:[a-f\d]{64}$"));
static INTEGER: LazyLock<Regex> = LazyLock::new(|| compile(r"^(0|-?[1-9]\d*)$"));
static DURATION: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^P(\d+Y)?(\d+M)?(\d+D)?(T(\d+H)?(\d+M)?(\d+S)?)?$"));
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$"));
static KEY: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z\d][A-Za-z\d_./-]*$"));
static KEY_CONSECUTIVE: LazyLock<Regex> = LazyLock::new(|| compile(r"[_./-]{2}"));

// Patterns are constants above
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("constant regex pattern is valid")
}

fn matching(re: &Regex, value: &str) -> Option<String> {
    re.is_match(value).then(|| value.to_string())
}

fn coerce_text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn coerce_curie(value: &str) -> Option<String> {
    matching(&CURIE, value)
}

fn coerce_datetime(value: &str) -> Option<String> {
    matching(&DATETIME, value)
}

fn coerce_hash(value: &str) -> Option<String> {
    matching(&HASH, value)
}

fn coerce_name(value: &str) -> Option<String> {
    matching(&NAME, value)
}

fn coerce_timestamp(value: &str) -> Option<String> {
    matching(&TIMESTAMP, value)
}

fn coerce_integer(value: &str) -> Option<String> {
    let canonical = value.strip_prefix('+').unwrap_or(value);
    matching(&INTEGER, canonical)
}

fn is_duration(value: &str) -> bool {
    DURATION.is_match(value) && value != "P" && !value.ends_with('T')
}

fn coerce_period(value: &str) -> Option<String> {
    let valid = match value.split_once('/') {
        Some((start, end)) => {
            let part = |p: &str| DATETIME.is_match(p) || is_duration(p);
            part(start) && part(end)
        }
        None => is_duration(value),
    };
    valid.then(|| value.to_string())
}

fn coerce_url(value: &str) -> Option<String> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    let valid = host.contains('.') && !host.starts_with('.') && !host.ends_with('.');
    valid.then(|| value.to_string())
}

/// Whether `key` is acceptable as a primary-key value
pub fn is_valid_key(key: &str) -> bool {
    KEY.is_match(key) && !KEY_CONSECUTIVE.is_match(key)
}

#[cfg(test)]
#[path = "datatype_tests.rs"]
mod tests;
