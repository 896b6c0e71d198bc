// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! Register schema
//!
//! The schema is not configured, it is derived: replay folds `system` scope
//! records into it. The records that matter are:
//!
//! - `name`: the register name, which is also the primary-key field
//! - `field:<id>`: one attribute definition per field
//! - `register:<name>`: the declared field list and description
//! - `custodian`: who maintains the register
//!
//! A schema is ready once the name is known and its primary-key field is
//! defined.

mod datatype;

pub use datatype::{is_valid_key, Coercer, Datatype, TypeError};

use crate::item::{Item, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors folding a metadata record into the schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("metadata record '{key}' is missing '{field}'")]
    MissingProperty { key: String, field: &'static str },
    #[error("metadata record '{key}': {reason}")]
    InvalidProperty { key: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    One,
    Many,
}

impl Cardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::One => "1",
            Cardinality::Many => "n",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cardinality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Cardinality::One),
            "n" => Ok(Cardinality::Many),
            other => Err(format!("unknown cardinality '{}'", other)),
        }
    }
}

/// A field definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub field: String,
    pub datatype: Datatype,
    pub cardinality: Cardinality,
    pub text: Option<String>,
}

impl Attribute {
    pub fn new(field: impl Into<String>, datatype: Datatype, cardinality: Cardinality) -> Self {
        Self {
            field: field.into(),
            datatype,
            cardinality,
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Read an attribute from a `field:<id>` item
    pub fn from_item(key: &str, item: &Item) -> Result<Self, SchemaError> {
        let property = |field: &'static str| {
            item.get_str(field).ok_or_else(|| SchemaError::MissingProperty {
                key: key.to_string(),
                field,
            })
        };
        let invalid = |reason: String| SchemaError::InvalidProperty {
            key: key.to_string(),
            reason,
        };

        let field = property("field")?;
        if key.strip_prefix("field:") != Some(field) {
            return Err(invalid(format!("defines field '{}'", field)));
        }
        let datatype = property("datatype")?.parse::<Datatype>().map_err(invalid)?;
        let cardinality = property("cardinality")?.parse::<Cardinality>().map_err(invalid)?;

        Ok(Self {
            field: field.to_string(),
            datatype,
            cardinality,
            text: item.get_str("text").map(str::to_string),
        })
    }

    pub fn to_item(&self) -> Item {
        let mut item = Item::new()
            .with("field", self.field.as_str())
            .with("datatype", self.datatype.as_str())
            .with("cardinality", self.cardinality.as_str());
        if let Some(text) = &self.text {
            item.insert("text", text.as_str());
        }
        item
    }
}

/// How an item fails to conform to the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    UnknownField { field: String },
    MissingPrimaryKey { field: String },
    Cardinality { field: String, expected: Cardinality },
    Type(TypeError),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnknownField { field } => write!(f, "unknown field '{}'", field),
            Violation::MissingPrimaryKey { field } => {
                write!(f, "missing primary key field '{}'", field)
            }
            Violation::Cardinality { field, expected } => {
                write!(f, "field '{}' expects cardinality {}", field, expected)
            }
            Violation::Type(err) => write!(f, "{}", err),
        }
    }
}

/// Field set, primary key and register metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    name: Option<String>,
    attributes: Vec<Attribute>,
    register_fields: Option<Vec<String>>,
    description: Option<String>,
    custodian: Option<String>,
}

impl Schema {
    /// Schema for a register with the given name (its primary key)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Builder-style attribute definition
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.define(attribute);
        self
    }

    /// Define or redefine an attribute, keeping first-definition order
    pub fn define(&mut self, attribute: Attribute) {
        match self.attributes.iter_mut().find(|a| a.field == attribute.field) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Fold one `system` record into the schema
    ///
    /// Records this schema does not understand are ignored.
    pub fn apply(&mut self, key: &str, item: &Item) -> Result<(), SchemaError> {
        if key == "name" {
            let name = item.get_str("name").ok_or(SchemaError::MissingProperty {
                key: key.to_string(),
                field: "name",
            })?;
            self.name = Some(name.to_string());
        } else if key.starts_with("field:") {
            self.define(Attribute::from_item(key, item)?);
        } else if key.starts_with("register:") {
            self.register_fields = match item.get("fields") {
                Some(Value::Many(fields)) => Some(fields.clone()),
                Some(Value::One(field)) => Some(vec![field.clone()]),
                None => None,
            };
            self.description = item.get_str("text").map(str::to_string);
        } else if key == "custodian" {
            self.custodian = item.get_str("custodian").map(str::to_string);
        }
        Ok(())
    }

    /// Whether entry-affecting commands may be applied
    pub fn is_ready(&self) -> bool {
        self.primary_key().is_some_and(|pk| self.get(pk).is_some())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The primary-key field: the register name
    pub fn primary_key(&self) -> Option<&str> {
        self.name()
    }

    pub fn fields(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get(&self, field: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.field == field)
    }

    pub fn cardinality_of(&self, field: &str) -> Option<Cardinality> {
        self.get(field).map(|a| a.cardinality)
    }

    /// Declared field list from the `register:` record, if any
    pub fn register_fields(&self) -> Option<&[String]> {
        self.register_fields.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn custodian(&self) -> Option<&str> {
        self.custodian.as_deref()
    }

    /// Field names for tabular output: declared order first, then the rest
    pub fn field_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = self
            .register_fields()
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .filter(|f| self.get(f).is_some())
            .collect();
        for attribute in &self.attributes {
            if !order.contains(&attribute.field.as_str()) {
                order.push(&attribute.field);
            }
        }
        order
    }

    /// Check an item against field definitions, collecting every violation
    pub fn conform(&self, item: &Item) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Some(pk) = self.primary_key() {
            if item.get(pk).is_none() {
                violations.push(Violation::MissingPrimaryKey {
                    field: pk.to_string(),
                });
            }
        }

        for (field, value) in item.fields() {
            let Some(attribute) = self.get(field) else {
                violations.push(Violation::UnknownField {
                    field: field.to_string(),
                });
                continue;
            };

            let shape_ok = matches!(
                (attribute.cardinality, value),
                (Cardinality::One, Value::One(_)) | (Cardinality::Many, Value::Many(_))
            );
            if !shape_ok {
                violations.push(Violation::Cardinality {
                    field: field.to_string(),
                    expected: attribute.cardinality,
                });
                continue;
            }

            let coerce = attribute.datatype.coercer();
            for atom in value.atoms() {
                if coerce(atom).as_deref() != Some(atom.as_str()) {
                    violations.push(Violation::Type(TypeError {
                        field: field.to_string(),
                        value: atom.clone(),
                        expected: attribute.datatype,
                    }));
                }
            }
        }

        violations
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
