//! Result, statistics and metadata structures.

use crate::error::GenerationError;
use crate::options::GenerationOptions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one `generate` call.
///
/// `success` is a pure "zero errors" signal; `data` may still hold usable
/// partial output when `success` is false. Callers must consult both fields
/// rather than collapsing them into one pass/fail decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult<T> {
    /// True iff no validation or generation error was recorded.
    pub success: bool,

    /// Accepted entities in logical generation order.
    pub data: Vec<T>,

    /// Accumulated errors in the order they were recorded.
    pub errors: Vec<GenerationError>,

    /// Run statistics.
    pub statistics: GenerationStatistics,

    /// Run provenance.
    pub metadata: GenerationMetadata,
}

/// Statistics for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatistics {
    /// Items the caller asked for.
    pub total_requested: u64,

    /// Items that made it into `data`.
    pub total_generated: u64,

    /// Errors recorded (all classes).
    pub total_errors: u64,

    /// Wall-clock duration of the whole call.
    pub execution_time_ms: u64,

    /// Mean time spent in the producer per requested item.
    pub average_generation_time_ms: f64,

    /// Shallow estimate of the memory retained by `data`, in MiB.
    /// Informational only.
    pub memory_usage_mb: f64,
}

impl GenerationStatistics {
    /// Accepted items per second over the whole call.
    pub fn items_per_second(&self) -> f64 {
        if self.execution_time_ms > 0 {
            self.total_generated as f64 / (self.execution_time_ms as f64 / 1000.0)
        } else {
            0.0
        }
    }
}

/// Provenance for one generation run.
///
/// Everything here is informational; none of it feeds back into the
/// generated values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Effective seed the run was keyed by.
    pub seed: String,

    /// Identity of the domain producer (e.g. `"cooperative"`).
    pub generator: String,

    /// Version of the generating crate.
    pub version: String,

    /// Wall-clock time the run completed.
    pub timestamp: DateTime<Utc>,

    /// Snapshot of the options the run was called with.
    pub options: GenerationOptions,

    /// Ambient execution context.
    pub environment: EnvironmentInfo,
}

/// Opaque platform identifiers read from the ambient execution context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    /// Operating system name.
    pub os: String,

    /// CPU architecture.
    pub arch: String,

    /// OS family.
    pub family: String,
}

impl EnvironmentInfo {
    /// Capture the current execution context.
    pub fn capture() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            family: std::env::consts::FAMILY.to_string(),
        }
    }
}

/// Outcome of one `insert_bulk` call.
///
/// `inserted` equals rows actually visible in storage post-call.
/// Under the `Ignore` conflict policy `inserted + errors.len()` may be less
/// than the input length, since silently discarded conflicting rows are
/// neither inserted nor errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkInsertResult {
    /// Rows reported applied by the store.
    pub inserted: u64,

    /// Row-level persistence failures, in row order.
    pub errors: Vec<GenerationError>,

    /// Wall-clock duration of the whole call.
    pub execution_time_ms: u64,
}
