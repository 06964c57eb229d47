//! SQL construction and parameter assembly for batched INSERTs.
//!
//! Everything here is pure so statement shapes can be tested without a
//! live server; the stateful execution lives in [`crate::writer`].

use fixture_core::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio_postgres::types::ToSql;

/// Default batch size for INSERT operations.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// What to do when a persisted row would violate a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Surface the violation as a row-level database error.
    #[default]
    Fail,
    /// Silently drop the competing row (first-writer-wins); not an error.
    Ignore,
    /// Replace the existing row with the new values.
    Replace,
}

/// Options for one `insert_bulk` call.
#[derive(Debug, Clone)]
pub struct BulkInsertOptions {
    /// Rows per INSERT statement. Each statement is an atomic unit.
    pub batch_size: usize,

    /// Conflict resolution policy.
    pub on_conflict: ConflictPolicy,

    /// Column the uniqueness constraint lives on; used by `Replace`.
    pub conflict_target: String,

    /// Logical-to-physical column renames applied before SQL text is built.
    pub field_mapping: Option<HashMap<String, String>>,
}

impl Default for BulkInsertOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            on_conflict: ConflictPolicy::default(),
            conflict_target: "id".to_string(),
            field_mapping: None,
        }
    }
}

/// Apply the field mapping to a logical column list. Names absent from the
/// mapping pass through unchanged.
pub fn map_columns(logical: &[String], mapping: Option<&HashMap<String, String>>) -> Vec<String> {
    logical
        .iter()
        .map(|name| match mapping.and_then(|m| m.get(name)) {
            Some(mapped) => mapped.clone(),
            None => name.clone(),
        })
        .collect()
}

/// Build a multi-row parameterized INSERT statement.
pub fn build_insert_sql(
    table: &str,
    columns: &[String],
    row_count: usize,
    on_conflict: ConflictPolicy,
    conflict_target: &str,
) -> String {
    let col_count = columns.len();
    let mut placeholders: Vec<String> = Vec::with_capacity(row_count);
    let mut param_idx = 1;

    for _ in 0..row_count {
        let row_placeholders: Vec<String> = (0..col_count)
            .map(|_| {
                let p = format!("${param_idx}");
                param_idx += 1;
                p
            })
            .collect();
        placeholders.push(format!("({})", row_placeholders.join(", ")));
    }

    format!(
        "INSERT INTO \"{}\" ({}) VALUES {}{}",
        table,
        columns
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", "),
        placeholders.join(", "),
        conflict_clause(on_conflict, conflict_target, columns)
    )
}

/// The ON CONFLICT suffix for the chosen policy.
fn conflict_clause(policy: ConflictPolicy, target: &str, columns: &[String]) -> String {
    match policy {
        ConflictPolicy::Fail => String::new(),
        ConflictPolicy::Ignore => " ON CONFLICT DO NOTHING".to_string(),
        ConflictPolicy::Replace => {
            let assignments: Vec<String> = columns
                .iter()
                .filter(|c| c.as_str() != target)
                .map(|c| format!("\"{c}\" = EXCLUDED.\"{c}\""))
                .collect();
            if assignments.is_empty() {
                // Nothing to update besides the key itself.
                " ON CONFLICT DO NOTHING".to_string()
            } else {
                format!(
                    " ON CONFLICT (\"{target}\") DO UPDATE SET {}",
                    assignments.join(", ")
                )
            }
        }
    }
}

/// Convert a FieldValue to a boxed ToSql trait object.
pub fn boxed_param(value: &FieldValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        FieldValue::Null => Box::new(None::<String>),
        FieldValue::Bool(b) => Box::new(*b),
        FieldValue::Int32(i) => Box::new(*i),
        FieldValue::Int64(i) => Box::new(*i),
        FieldValue::Float64(f) => Box::new(*f),
        FieldValue::Text(s) => Box::new(s.clone()),
        FieldValue::Decimal(d) => Box::new(*d),
        FieldValue::Date(d) => Box::new(*d),
        FieldValue::Timestamp(ts) => Box::new(*ts),
        FieldValue::Json(j) => Box::new(j.clone()),
    }
}
