//! Database-agnostic row representation.
//!
//! Generated entities are strongly typed in the domain model; they cross
//! into the persistence writer as [`FixtureRow`] values holding
//! [`FieldValue`]s. Nested configuration records are serialized to JSON
//! only at this boundary, never carried as untyped text through the domain.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single column value, decoupled from any database driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// SQL NULL
    Null,

    /// Boolean value
    Bool(bool),

    /// 32-bit signed integer
    Int32(i32),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Float64(f64),

    /// Text value
    Text(String),

    /// Exact decimal value
    Decimal(Decimal),

    /// Calendar date
    Date(NaiveDate),

    /// Timestamp with timezone
    Timestamp(DateTime<Utc>),

    /// Structured JSON value
    Json(serde_json::Value),
}

impl FieldValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            Self::Int32(i) => Some(*i as i64),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }
}

/// One row headed for the persistence writer.
///
/// Columns keep their insertion order so placeholder positions line up with
/// parameter order when the SQL text is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRow {
    /// Logical index of the entity this row was built from.
    pub index: u64,

    /// Ordered (column name, value) pairs.
    pub columns: Vec<(String, FieldValue)>,
}

impl FixtureRow {
    /// Create an empty row for the entity at `index`.
    pub fn new(index: u64) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Append a column. Returns `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.columns.push((name.into(), value));
        self
    }

    /// Look up a column value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Substitute logical field names with physical column names.
    ///
    /// Names absent from the mapping pass through unchanged, so one
    /// generator can feed tables with different column naming.
    pub fn apply_mapping(&mut self, mapping: &HashMap<String, String>) {
        for (name, _) in &mut self.columns {
            if let Some(mapped) = mapping.get(name) {
                *name = mapped.clone();
            }
        }
    }
}

/// Bridge from a domain entity to its persisted row shape.
pub trait IntoRow {
    /// Build the row for this entity at logical index `index`.
    fn into_row(&self, index: u64) -> FixtureRow;
}
