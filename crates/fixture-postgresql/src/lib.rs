//! Bulk persistence writer for brf-fixtures over PostgreSQL.
//!
//! Turns an ordered sequence of [`fixture_core::FixtureRow`]s into rows in a
//! pre-existing table, batching for throughput, resolving key conflicts per
//! a caller-chosen policy, and remapping logical field names onto physical
//! column names.
//!
//! Batches are single multi-row INSERT statements and therefore atomic: a
//! mid-batch failure never leaves a batch half-applied without being
//! accounted for. A failed batch is retried row by row so each offending
//! row yields its own `database`-type error while the rest of the call
//! proceeds.
//!
//! Schema creation and migration are external collaborators; the writer
//! assumes a writable table and an exclusively owned client handle for the
//! duration of the call.

pub mod error;
pub mod insert;
pub mod writer;

// Re-exports for convenience
pub use error::BulkWriterError;
pub use insert::{BulkInsertOptions, ConflictPolicy, DEFAULT_BATCH_SIZE};
pub use writer::BulkWriter;
