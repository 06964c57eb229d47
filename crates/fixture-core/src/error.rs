//! Error taxonomy for generation and persistence.
//!
//! Per-item faults accumulate as [`GenerationError`] values inside result
//! structures and never abort a run. The only synchronously surfaced fault
//! class is caller misuse of options ([`OptionsError`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of an accumulated error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Business-rule rejection; the item was dropped and generation continued.
    Validation,
    /// The per-item producer raised a fault; the item was dropped.
    Generation,
    /// Persistence rejection; the row was dropped.
    Database,
}

/// Pipeline phase in which an event or error originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Option validation and bookkeeping setup.
    Initialization,
    /// Batched invocation of the entity producer.
    Generation,
    /// Business-rule validation of produced items.
    Validation,
    /// Bulk writing to the relational store.
    Persistence,
    /// Final statistics assembly.
    Complete,
}

/// A single accumulated error from a generation or persistence run.
///
/// Carries enough detail (type, phase, timestamp, item index) to triage a
/// rejected item without a separate debug run. One rejected item may yield
/// several errors, one per violated rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationError {
    /// Error classification.
    pub error_type: ErrorType,

    /// Human-readable description.
    pub message: String,

    /// Wall-clock time the error was recorded (informational only).
    pub timestamp: DateTime<Utc>,

    /// Phase the error originated in.
    pub phase: Phase,

    /// Logical index of the offending item, where known.
    pub index: Option<u64>,
}

impl GenerationError {
    /// Record a business-rule rejection for the item at `index`.
    pub fn validation(message: impl Into<String>, index: u64) -> Self {
        Self {
            error_type: ErrorType::Validation,
            message: message.into(),
            timestamp: Utc::now(),
            phase: Phase::Validation,
            index: Some(index),
        }
    }

    /// Record a producer fault for the item at `index`.
    pub fn generation(message: impl Into<String>, index: u64) -> Self {
        Self {
            error_type: ErrorType::Generation,
            message: message.into(),
            timestamp: Utc::now(),
            phase: Phase::Generation,
            index: Some(index),
        }
    }

    /// Record a persistence rejection for the row at `index`.
    pub fn database(message: impl Into<String>, index: Option<u64>) -> Self {
        Self {
            error_type: ErrorType::Database,
            message: message.into(),
            timestamp: Utc::now(),
            phase: Phase::Persistence,
            index,
        }
    }
}

/// Caller misuse of [`crate::GenerationOptions`].
///
/// Unlike the accumulated classes above, these abort the call synchronously:
/// they signal a contract violation, not data-quality noise.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// `count` must be at least 1.
    #[error("count must be positive")]
    NonPositiveCount,

    /// `batch_size` must be at least 1.
    #[error("batch_size must be positive")]
    NonPositiveBatchSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors_carry_phase_and_index() {
        let v = GenerationError::validation("name is empty", 7);
        assert_eq!(v.error_type, ErrorType::Validation);
        assert_eq!(v.phase, Phase::Validation);
        assert_eq!(v.index, Some(7));

        let g = GenerationError::generation("producer fault", 3);
        assert_eq!(g.error_type, ErrorType::Generation);
        assert_eq!(g.phase, Phase::Generation);

        let d = GenerationError::database("duplicate key", Some(12));
        assert_eq!(d.error_type, ErrorType::Database);
        assert_eq!(d.phase, Phase::Persistence);
        assert_eq!(d.index, Some(12));
    }

    #[test]
    fn test_error_type_serde_snake_case() {
        let json = serde_json::to_string(&ErrorType::Validation).unwrap();
        assert_eq!(json, "\"validation\"");

        let parsed: Phase = serde_json::from_str("\"persistence\"").unwrap();
        assert_eq!(parsed, Phase::Persistence);
    }
}
