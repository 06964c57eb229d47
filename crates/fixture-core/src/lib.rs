//! Shared types for the brf-fixtures generation framework.
//!
//! This crate defines the vocabulary spoken by every other part of the
//! framework: generation options and their misuse checks, result/statistics/
//! metadata structures, the accumulating error taxonomy, progress events,
//! the validation contract, and the database-agnostic row representation
//! that bridges generated entities into the persistence writer.
//!
//! Nothing in this crate performs I/O or holds mutable state; it is the
//! stable seam between the generation engine, the domain producers, and the
//! bulk persistence writer.

pub mod error;
pub mod options;
pub mod progress;
pub mod result;
pub mod row;
pub mod validate;

// Re-exports for convenience
pub use error::{ErrorType, GenerationError, OptionsError, Phase};
pub use options::GenerationOptions;
pub use progress::{ProgressEvent, ProgressSink};
pub use result::{
    BulkInsertResult, EnvironmentInfo, GenerationMetadata, GenerationResult, GenerationStatistics,
};
pub use row::{FieldValue, FixtureRow, IntoRow};
pub use validate::{EntityValidator, ValidationResult};
