//! Live PostgreSQL tests for the bulk writer.
//!
//! Ignored by default; run against a disposable database with
//!
//! ```bash
//! FIXTURE_POSTGRES_URL="host=localhost user=postgres password=postgres dbname=fixtures" \
//!     cargo test -- --ignored
//! ```

use brf_fixtures::producers::CooperativeGenerator;
use brf_fixtures::{
    BulkInsertOptions, BulkWriter, ConflictPolicy, FieldValue, FixtureRow, GenerationEngine,
    GenerationOptions,
};
use tokio_postgres::{Client, NoTls};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for tests
fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

async fn connect() -> Client {
    let url = std::env::var("FIXTURE_POSTGRES_URL")
        .expect("FIXTURE_POSTGRES_URL must point at a disposable database");
    let (client, connection) = tokio_postgres::connect(&url, NoTls)
        .await
        .expect("failed to connect");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("connection error: {e}");
        }
    });
    client
}

async fn recreate(client: &Client, table: &str, ddl: &str) {
    client
        .batch_execute(&format!("DROP TABLE IF EXISTS \"{table}\"; {ddl}"))
        .await
        .expect("failed to recreate table");
}

fn keyed_row(index: u64, id: &str, name: &str) -> FixtureRow {
    FixtureRow::new(index)
        .with("id", FieldValue::Text(id.to_string()))
        .with("name", FieldValue::Text(name.to_string()))
}

#[tokio::test]
#[ignore]
async fn conflicting_rows_are_ignored_first_writer_wins() {
    init_logging();
    let client = connect().await;
    recreate(
        &client,
        "conflict_test",
        "CREATE TABLE \"conflict_test\" (\"id\" TEXT PRIMARY KEY, \"name\" TEXT NOT NULL)",
    )
    .await;

    let rows = vec![
        keyed_row(0, "shared-key", "first"),
        keyed_row(1, "shared-key", "second"),
    ];

    let writer = BulkWriter::new(&client, "conflict_test");
    let options = BulkInsertOptions {
        on_conflict: ConflictPolicy::Ignore,
        ..Default::default()
    };
    let result = writer.insert_bulk(&rows, &options, None).await.unwrap();

    assert_eq!(result.inserted, 1);
    assert!(result.errors.is_empty());

    let row = client
        .query_one("SELECT \"name\" FROM \"conflict_test\" WHERE \"id\" = $1", &[&"shared-key"])
        .await
        .unwrap();
    let name: String = row.get(0);
    assert_eq!(name, "first");
}

#[tokio::test]
#[ignore]
async fn conflicting_rows_are_replaced_under_replace_policy() {
    init_logging();
    let client = connect().await;
    recreate(
        &client,
        "replace_test",
        "CREATE TABLE \"replace_test\" (\"id\" TEXT PRIMARY KEY, \"name\" TEXT NOT NULL)",
    )
    .await;

    let rows = vec![
        keyed_row(0, "shared-key", "first"),
        keyed_row(1, "shared-key", "second"),
    ];

    let writer = BulkWriter::new(&client, "replace_test");
    let options = BulkInsertOptions {
        on_conflict: ConflictPolicy::Replace,
        // One row per statement so the second row conflicts with the first.
        batch_size: 1,
        ..Default::default()
    };
    let result = writer.insert_bulk(&rows, &options, None).await.unwrap();

    assert_eq!(result.inserted, 2);
    assert!(result.errors.is_empty());

    let row = client
        .query_one("SELECT \"name\" FROM \"replace_test\" WHERE \"id\" = $1", &[&"shared-key"])
        .await
        .unwrap();
    let name: String = row.get(0);
    assert_eq!(name, "second");
}

#[tokio::test]
#[ignore]
async fn failing_rows_are_isolated_and_counted() {
    init_logging();
    let client = connect().await;
    recreate(
        &client,
        "fail_test",
        "CREATE TABLE \"fail_test\" (\"id\" TEXT PRIMARY KEY, \"name\" TEXT NOT NULL)",
    )
    .await;

    let rows = vec![
        keyed_row(0, "a", "first"),
        keyed_row(1, "a", "duplicate key"),
        keyed_row(2, "b", "second"),
    ];

    let writer = BulkWriter::new(&client, "fail_test");
    let result = writer
        .insert_bulk(&rows, &BulkInsertOptions::default(), None)
        .await
        .unwrap();

    // The batch fails atomically, then the row-by-row retry lands rows 0
    // and 2 and records one database error for row 1.
    assert_eq!(result.inserted, 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].index, Some(1));
}

#[tokio::test]
#[ignore]
async fn generated_cooperatives_round_trip_into_postgres() {
    init_logging();
    let client = connect().await;
    recreate(
        &client,
        "cooperatives",
        "CREATE TABLE \"cooperatives\" (
            \"id\" TEXT PRIMARY KEY,
            \"name\" TEXT NOT NULL,
            \"org_number\" TEXT NOT NULL UNIQUE,
            \"city\" TEXT NOT NULL,
            \"postal_code\" TEXT NOT NULL,
            \"size_class\" TEXT NOT NULL,
            \"age_class\" TEXT NOT NULL,
            \"construction_year\" INTEGER NOT NULL,
            \"apartment_count\" INTEGER NOT NULL,
            \"total_area_sqm\" DOUBLE PRECISION NOT NULL,
            \"fee_per_sqm\" NUMERIC NOT NULL,
            \"bankgiro\" TEXT NOT NULL,
            \"config\" JSONB NOT NULL
        )",
    )
    .await;

    let mut engine = GenerationEngine::new(CooperativeGenerator::brf_default(), "live-demo");
    let (generated, persisted) = brf_fixtures::populate_table(
        &client,
        "cooperatives",
        &mut engine,
        &GenerationOptions::with_count(250),
        &BulkInsertOptions::default(),
    )
    .await
    .unwrap();

    assert!(generated.success);
    assert_eq!(persisted.inserted, 250);
    assert!(persisted.errors.is_empty());

    let row = client
        .query_one("SELECT COUNT(*) FROM \"cooperatives\"", &[])
        .await
        .unwrap();
    let count: i64 = row.get(0);
    assert_eq!(count, 250);
}
