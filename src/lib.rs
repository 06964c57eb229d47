//! brf-fixtures
//!
//! Deterministic synthetic-data generation and bulk persistence for Swedish
//! housing-cooperative (BRF) test fixtures: cooperatives, members,
//! apartments and financial records, reproducible under a string seed and
//! written into PostgreSQL with conflict-aware batched inserts.
//!
//! # Crates
//!
//! - `fixture-core`: options, results, errors, progress, validation and
//!   the database-agnostic row representation
//! - `fixture-generator`: the seeded random source, the generation engine
//!   and the BRF domain producers
//! - `fixture-postgresql`: the bulk persistence writer
//!
//! # Example
//!
//! ```no_run
//! use brf_fixtures::producers::CooperativeGenerator;
//! use brf_fixtures::{BulkInsertOptions, GenerationEngine, GenerationOptions};
//!
//! # async fn run(client: &tokio_postgres::Client) -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = GenerationEngine::new(CooperativeGenerator::brf_default(), "demo");
//! let (generated, persisted) = brf_fixtures::populate_table(
//!     client,
//!     "cooperatives",
//!     &mut engine,
//!     &GenerationOptions::with_count(500),
//!     &BulkInsertOptions::default(),
//! )
//! .await?;
//! println!(
//!     "generated {} rows, persisted {}",
//!     generated.statistics.total_generated, persisted.inserted
//! );
//! # Ok(())
//! # }
//! ```

use thiserror::Error;
use tokio_postgres::Client;

pub use fixture_core::{
    BulkInsertResult, EntityValidator, ErrorType, FieldValue, FixtureRow, GenerationError,
    GenerationMetadata, GenerationOptions, GenerationResult, GenerationStatistics, IntoRow,
    OptionsError, Phase, ProgressEvent, ProgressSink, ValidationResult,
};
pub use fixture_generator::{producers, swedish};
pub use fixture_generator::{
    Distribution, DistributionError, EngineError, EntityProducer, GenerationEngine, ProduceError,
    SeededRng,
};
pub use fixture_postgresql::{BulkInsertOptions, BulkWriter, BulkWriterError, ConflictPolicy};

/// Error type for the chained generate-then-persist flow.
#[derive(Debug, Error)]
pub enum PopulateError {
    /// Generation aborted for caller misuse of the options.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The bulk writer aborted.
    #[error(transparent)]
    Writer(#[from] BulkWriterError),
}

/// Generate entities and bulk-insert them into `table`.
///
/// Returns both result structures: per-item generation errors live in the
/// first, row-level persistence errors in the second. Batches are written
/// in generation order.
pub async fn populate_table<P>(
    client: &Client,
    table: &str,
    engine: &mut GenerationEngine<P>,
    generation_options: &GenerationOptions,
    insert_options: &BulkInsertOptions,
) -> Result<(GenerationResult<P::Entity>, BulkInsertResult), PopulateError>
where
    P: EntityProducer,
    P::Entity: IntoRow,
{
    let generated = engine.generate(generation_options).await?;

    let rows: Vec<FixtureRow> = generated
        .data
        .iter()
        .enumerate()
        .map(|(index, entity)| entity.into_row(index as u64))
        .collect();

    let writer = BulkWriter::new(client, table);
    let persisted = writer.insert_bulk(&rows, insert_options, None).await?;

    Ok((generated, persisted))
}
