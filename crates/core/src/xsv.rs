// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Tabular (CSV/TSV) input and output
//!
//! The column delimiter is detected from the header line: tab or comma.
//! Semicolon is reserved as the separator between the values of a
//! cardinality `n` cell, so a semicolon delimited file is rejected rather
//! than misread. Cells may be double-quoted; inside a multi-value cell a
//! value containing `;` is quoted as well.

use crate::item::{Item, Value};
use crate::schema::{is_valid_key, Attribute, Cardinality, Schema, TypeError};
use std::fmt;
use thiserror::Error;

/// Separator between values of a multi-value cell
pub const MULTI_VALUE_SEPARATOR: char = ';';

/// Errors deserializing a whole tabular document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XsvError {
    #[error("input has no header row")]
    MissingHeader,
    #[error("';' cannot be used as a column delimiter, it separates multiple values")]
    SemicolonDelimiter,
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },
    #[error("header column '{0}' is not a field of the register")]
    UnknownColumn(String),
    #[error("header column '{0}' appears more than once")]
    DuplicateColumn(String),
    #[error("header is missing the primary key column '{0}'")]
    MissingKeyColumn(String),
    #[error("schema is not ready")]
    SchemaNotReady,
    #[error(transparent)]
    Rows(#[from] RowErrors),
}

/// A problem with one data row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: {kind}")]
pub struct RowError {
    /// 1-based data row number (the header is row 0)
    pub row: usize,
    pub kind: RowErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowErrorKind {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("missing value for primary key '{0}'")]
    MissingKey(String),
    #[error("invalid key '{0}'")]
    InvalidKey(String),
    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Every row error found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowErrors {
    pub errors: Vec<RowError>,
}

impl fmt::Display for RowErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid row(s):", self.errors.len())?;
        for err in &self.errors {
            write!(f, "\n  {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for RowErrors {}

/// Column delimiter of a tabular document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
        }
    }

    /// Pick the delimiter by counting unquoted candidates in the header line
    pub fn detect(header: &str) -> Result<Self, XsvError> {
        let (mut tabs, mut commas, mut semicolons) = (0, 0, 0);
        let mut quoted = false;
        for c in header.chars() {
            match c {
                '"' => quoted = !quoted,
                '\t' if !quoted => tabs += 1,
                ',' if !quoted => commas += 1,
                ';' if !quoted => semicolons += 1,
                _ => {}
            }
        }

        if tabs > 0 && tabs >= commas {
            Ok(Delimiter::Tab)
        } else if commas > 0 {
            Ok(Delimiter::Comma)
        } else if semicolons > 0 {
            Err(XsvError::SemicolonDelimiter)
        } else {
            // Single column
            Ok(Delimiter::Comma)
        }
    }
}

/// One physical record: its starting line and its cells
struct Record {
    line: usize,
    cells: Vec<String>,
}

/// Split text into records
///
/// A cell starting with `"` is quoted: delimiters and newlines inside it are
/// literal and `""` stands for one quote. Quotes elsewhere are literal.
fn split_records(text: &str, delimiter: char) -> Result<Vec<Record>, XsvError> {
    let mut records = Vec::new();
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut at_start = true;
    let mut line = 1;
    let mut start_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => quoted = false,
                '\n' => {
                    line += 1;
                    cell.push(c);
                }
                _ => cell.push(c),
            }
            continue;
        }

        match c {
            '"' if at_start => {
                quoted = true;
                at_start = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                cells.push(std::mem::take(&mut cell));
                records.push(Record {
                    line: start_line,
                    cells: std::mem::take(&mut cells),
                });
                line += 1;
                start_line = line;
                at_start = true;
            }
            c if c == delimiter => {
                cells.push(std::mem::take(&mut cell));
                at_start = true;
            }
            _ => {
                cell.push(c);
                at_start = false;
            }
        }
    }

    if quoted {
        return Err(XsvError::UnterminatedQuote { line: start_line });
    }
    if !cell.is_empty() || !cells.is_empty() {
        cells.push(cell);
        records.push(Record {
            line: start_line,
            cells,
        });
    }

    // Blank lines carry no data
    records.retain(|r| !(r.cells.len() == 1 && r.cells[0].trim().is_empty()));
    Ok(records)
}

/// Split a multi-value cell on `;`, dropping empty values
///
/// A value starting with `"` is quoted like a cell. Newlines are literal
/// everywhere: the cell has already been cut out of its record.
pub fn split_values(cell: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut value = String::new();
    let mut quoted = false;
    let mut at_start = true;
    let mut chars = cell.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    value.push('"');
                }
                '"' => quoted = false,
                _ => value.push(c),
            }
            continue;
        }

        match c {
            '"' if at_start => {
                quoted = true;
                at_start = false;
            }
            MULTI_VALUE_SEPARATOR => {
                values.push(std::mem::take(&mut value));
                at_start = true;
            }
            _ => {
                value.push(c);
                at_start = false;
            }
        }
    }
    values.push(value);

    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Deserialize tabular text into items conforming to `schema`
///
/// Row order is preserved. Problems in individual rows are collected so
/// that every bad row is reported at once.
pub fn deserialize(text: &str, schema: &Schema) -> Result<Vec<Item>, XsvError> {
    let primary_key = match schema.primary_key() {
        Some(pk) if schema.is_ready() => pk,
        _ => return Err(XsvError::SchemaNotReady),
    };

    let header_line = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(XsvError::MissingHeader)?;
    let delimiter = Delimiter::detect(header_line)?;

    let mut records = split_records(text, delimiter.as_char())?.into_iter();
    let header = records.next().ok_or(XsvError::MissingHeader)?;

    let mut columns: Vec<&Attribute> = Vec::with_capacity(header.cells.len());
    for name in &header.cells {
        let name = name.trim();
        let attribute = schema
            .get(name)
            .ok_or_else(|| XsvError::UnknownColumn(name.to_string()))?;
        if columns.iter().any(|a| a.field == name) {
            return Err(XsvError::DuplicateColumn(name.to_string()));
        }
        columns.push(attribute);
    }
    if !columns.iter().any(|a| a.field == primary_key) {
        return Err(XsvError::MissingKeyColumn(primary_key.to_string()));
    }

    let mut items = Vec::new();
    let mut errors = Vec::new();

    for (index, record) in records.enumerate() {
        let row = index + 1;
        if record.cells.len() != columns.len() {
            errors.push(RowError {
                row,
                kind: RowErrorKind::ColumnCount {
                    expected: columns.len(),
                    found: record.cells.len(),
                },
            });
            continue;
        }

        let mut item = Item::new();
        let mut row_errors = Vec::new();

        for (attribute, cell) in columns.iter().zip(&record.cells) {
            let field = attribute.field.as_str();
            let raw = cell.trim();
            if raw.is_empty() || raw == ";" {
                continue;
            }

            if field == primary_key && !is_valid_key(raw) {
                row_errors.push(RowErrorKind::InvalidKey(raw.to_string()));
                continue;
            }

            match attribute.cardinality {
                Cardinality::One => match attribute.datatype.coerce(field, raw) {
                    Ok(value) => item.insert(field, value),
                    Err(err) => row_errors.push(err.into()),
                },
                Cardinality::Many => {
                    let mut values = Vec::new();
                    for atom in split_values(raw) {
                        match attribute.datatype.coerce(field, &atom) {
                            Ok(value) => values.push(value),
                            Err(err) => row_errors.push(err.into()),
                        }
                    }
                    if !values.is_empty() {
                        item.insert(field, values);
                    }
                }
            }
        }

        if item.get(primary_key).is_none() && row_errors.is_empty() {
            row_errors.push(RowErrorKind::MissingKey(primary_key.to_string()));
        }

        if row_errors.is_empty() {
            items.push(item);
        } else {
            tracing::debug!(row, line = record.line, errors = row_errors.len(), "rejected row");
            errors.extend(row_errors.into_iter().map(|kind| RowError { row, kind }));
        }
    }

    if !errors.is_empty() {
        return Err(RowErrors { errors }.into());
    }

    tracing::debug!(rows = items.len(), ?delimiter, "deserialized tabular input");
    Ok(items)
}

/// Serialize a value for a tabular cell: multi-values joined by `;`
pub fn serialize_value(value: &Value) -> String {
    match value {
        Value::One(value) => value.clone(),
        Value::Many(values) => values
            .iter()
            .map(|v| {
                if v.contains(MULTI_VALUE_SEPARATOR) {
                    format!("\"{}\"", v)
                } else {
                    v.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(";"),
    }
}

/// Quote a cell for comma separated output when needed
fn quote_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Serialize items as CSV with the given header columns
pub fn serialize<'a>(headers: &[&str], items: impl IntoIterator<Item = &'a Item>) -> String {
    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| quote_cell(h)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for item in items {
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                item.get(h)
                    .map(|v| quote_cell(&serialize_value(v)))
                    .unwrap_or_default()
            })
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "xsv_tests.rs"]
mod tests;
