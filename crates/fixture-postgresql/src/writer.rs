//! The stateful bulk writer.

use crate::error::BulkWriterError;
use crate::insert::{boxed_param, build_insert_sql, map_columns, BulkInsertOptions};
use fixture_core::{
    BulkInsertResult, FixtureRow, GenerationError, Phase, ProgressEvent, ProgressSink,
};
use std::time::Instant;
use tokio_postgres::types::ToSql;
use tokio_postgres::Client;
use tracing::{debug, info, warn};

/// Writes ordered row sequences into one PostgreSQL table.
///
/// The client handle is assumed exclusively owned for the duration of each
/// call; concurrent external writes to the same table make the returned
/// `inserted` count unreliable.
pub struct BulkWriter<'a> {
    client: &'a Client,
    table: String,
}

impl<'a> BulkWriter<'a> {
    /// Create a writer for `table`.
    pub fn new(client: &'a Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// The target table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Insert `rows` in submission order, batched per the options.
    ///
    /// Row-level failures other than a handled conflict become
    /// `database`-type errors in the result; the call aborts only for
    /// caller misuse of the options or a connection-level fault.
    pub async fn insert_bulk(
        &self,
        rows: &[FixtureRow],
        options: &BulkInsertOptions,
        progress: Option<&ProgressSink>,
    ) -> Result<BulkInsertResult, BulkWriterError> {
        if options.batch_size == 0 {
            return Err(BulkWriterError::Config(
                "batch_size must be positive".to_string(),
            ));
        }

        let started = Instant::now();
        let mut result = BulkInsertResult::default();

        if rows.is_empty() {
            return Ok(result);
        }

        let logical: Vec<String> = rows[0]
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let physical = map_columns(&logical, options.field_mapping.as_ref());

        info!(
            table = %self.table,
            rows = rows.len(),
            batch_size = options.batch_size,
            policy = ?options.on_conflict,
            "starting bulk insert"
        );

        let total = rows.len() as u64;
        let mut submitted = 0u64;

        for batch in rows.chunks(options.batch_size) {
            // Rows must share the first row's shape so placeholder positions
            // line up with parameter order.
            let mut accepted: Vec<&FixtureRow> = Vec::with_capacity(batch.len());
            for row in batch {
                if row.column_names() == logical.iter().map(String::as_str).collect::<Vec<_>>() {
                    accepted.push(row);
                } else {
                    result.errors.push(GenerationError::database(
                        "row columns do not match the first row's shape",
                        Some(row.index),
                    ));
                }
            }

            if !accepted.is_empty() {
                let sql = build_insert_sql(
                    &self.table,
                    &physical,
                    accepted.len(),
                    options.on_conflict,
                    &options.conflict_target,
                );
                let params: Vec<Box<dyn ToSql + Sync + Send>> = accepted
                    .iter()
                    .flat_map(|row| row.columns.iter().map(|(_, value)| boxed_param(value)))
                    .collect();
                let param_refs: Vec<&(dyn ToSql + Sync)> = params
                    .iter()
                    .map(|p| p.as_ref() as &(dyn ToSql + Sync))
                    .collect();

                match self.client.execute(&sql, &param_refs).await {
                    Ok(applied) => {
                        result.inserted += applied;
                        debug!(batch_rows = accepted.len(), applied, "batch applied");
                    }
                    Err(batch_error) => {
                        // The multi-row statement is atomic, so nothing from
                        // this batch landed. Retry row by row to isolate the
                        // offenders.
                        warn!(
                            table = %self.table,
                            error = %batch_error,
                            "batch failed, retrying rows individually"
                        );
                        self.insert_rows_individually(&accepted, &physical, options, &mut result)
                            .await;
                    }
                }
            }

            submitted += batch.len() as u64;
            if let Some(sink) = progress {
                sink(&ProgressEvent::new(Phase::Persistence, submitted, total));
            }
        }

        result.execution_time_ms = started.elapsed().as_millis() as u64;

        info!(
            table = %self.table,
            inserted = result.inserted,
            errors = result.errors.len(),
            elapsed_ms = result.execution_time_ms,
            "bulk insert complete"
        );

        Ok(result)
    }

    async fn insert_rows_individually(
        &self,
        rows: &[&FixtureRow],
        physical: &[String],
        options: &BulkInsertOptions,
        result: &mut BulkInsertResult,
    ) {
        let sql = build_insert_sql(
            &self.table,
            physical,
            1,
            options.on_conflict,
            &options.conflict_target,
        );

        for row in rows {
            let params: Vec<Box<dyn ToSql + Sync + Send>> = row
                .columns
                .iter()
                .map(|(_, value)| boxed_param(value))
                .collect();
            let param_refs: Vec<&(dyn ToSql + Sync)> = params
                .iter()
                .map(|p| p.as_ref() as &(dyn ToSql + Sync))
                .collect();

            match self.client.execute(&sql, &param_refs).await {
                Ok(applied) => result.inserted += applied,
                Err(row_error) => {
                    result.errors.push(GenerationError::database(
                        row_error.to_string(),
                        Some(row.index),
                    ));
                }
            }
        }
    }
}
