//! Error types for the bulk writer.

use thiserror::Error;

/// Errors that abort an `insert_bulk` call.
///
/// Row-level persistence failures do not abort; they accumulate as
/// `database`-type errors inside [`fixture_core::BulkInsertResult`].
#[derive(Error, Debug)]
pub enum BulkWriterError {
    /// PostgreSQL connection or statement error outside row handling.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Caller misuse of the insert options.
    #[error("configuration error: {0}")]
    Config(String),
}
