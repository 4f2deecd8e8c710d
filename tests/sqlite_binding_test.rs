// End-to-end binding against an in-memory SQLite database
//
// Run with:
//   cargo test --test sqlite_binding_test --features sqlite
#![cfg(feature = "sqlite")]

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, Row};
use sqlx_named_binding::backend::sqlite::{binding, binding_as, binding_one};
use sqlx_named_binding::{params, Error, Outcome, Params, StatementKind};

// A single connection: every connection to `sqlite::memory:` is its own database.
async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}

async fn create_test_table(pool: &SqlitePool) {
    let outcome = binding(
        pool,
        "CREATE TABLE IF NOT EXISTS test_table (id INTEGER PRIMARY KEY, name TEXT)",
        &Params::new(),
        StatementKind::Statement,
    )
    .await
    .expect("Failed to create table");
    assert!(outcome.is_success());
}

#[derive(Debug, FromRow, PartialEq)]
struct TestRow {
    id: i64,
    name: Option<String>,
}

#[tokio::test]
async fn test_simple_select() -> Result<(), Error> {
    let pool = memory_pool().await;

    let rows = binding(&pool, "SELECT 1+1 as total", &Params::new(), StatementKind::Select)
        .await?
        .into_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<i64, _>("total"), 2);
    Ok(())
}

#[tokio::test]
async fn test_simple_select_with_params() -> Result<(), Error> {
    let pool = memory_pool().await;

    let rows = binding(
        &pool,
        "SELECT :num1+:num2 as total",
        &params! { "num1" => 5, "num2" => 3 },
        StatementKind::Select,
    )
    .await?
    .into_rows();

    assert_eq!(rows[0].get::<i64, _>("total"), 8);
    Ok(())
}

#[tokio::test]
async fn test_array_binding() -> Result<(), Error> {
    let pool = memory_pool().await;

    let rows = binding(
        &pool,
        "SELECT COUNT(*) as count FROM (SELECT 1 as id UNION SELECT 2 UNION SELECT 3 UNION SELECT 4) t WHERE t.id IN ([:ids])",
        &params! { "ids" => [1, 3, 4] },
        StatementKind::Select,
    )
    .await?
    .into_rows();

    assert_eq!(rows[0].get::<i64, _>("count"), 3);
    Ok(())
}

#[tokio::test]
async fn test_single_id_binding() -> Result<(), Error> {
    let pool = memory_pool().await;

    let rows = binding(
        &pool,
        "SELECT 1 as found FROM (SELECT 1 as id) t WHERE t.id = :id",
        &params! { "id" => 1 },
        StatementKind::Select,
    )
    .await?
    .into_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<i64, _>("found"), 1);
    Ok(())
}

#[tokio::test]
async fn test_different_statement_kinds() -> Result<(), Error> {
    let pool = memory_pool().await;
    create_test_table(&pool).await;

    let inserted = binding(
        &pool,
        "INSERT INTO test_table (name) VALUES (:name)",
        &params! { "name" => "test" },
        StatementKind::AffectingStatement,
    )
    .await?;
    assert_eq!(inserted.rows_affected(), Some(1));

    let updated = binding(
        &pool,
        "UPDATE test_table SET name = :new_name WHERE name = :old_name",
        &params! { "new_name" => "updated", "old_name" => "test" },
        StatementKind::AffectingStatement,
    )
    .await?;
    assert_eq!(updated.rows_affected(), Some(1));

    let deleted = binding(
        &pool,
        "DELETE FROM test_table WHERE name = :name",
        &params! { "name" => "updated" },
        StatementKind::AffectingStatement,
    )
    .await?;
    assert_eq!(deleted.rows_affected(), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_ddl_as_affecting_statement_reports_zero() -> Result<(), Error> {
    let pool = memory_pool().await;

    let created = binding(
        &pool,
        "CREATE TABLE ddl_table (id INTEGER PRIMARY KEY, name TEXT)",
        &Params::new(),
        StatementKind::AffectingStatement,
    )
    .await?;
    assert_eq!(created.rows_affected(), Some(0));
    Ok(())
}

#[tokio::test]
async fn test_u64_binds_as_integer() -> Result<(), Error> {
    let pool = memory_pool().await;

    let rows = binding(
        &pool,
        "SELECT typeof(:n) AS kind, (:n = 5) AS eq",
        &Params::new().bind("n", 5u64),
        StatementKind::Select,
    )
    .await?
    .into_rows();

    assert_eq!(rows[0].get::<String, _>("kind"), "integer");
    assert_eq!(rows[0].get::<i64, _>("eq"), 1);
    Ok(())
}

#[tokio::test]
async fn test_kinds_parsed_from_names() -> Result<(), Error> {
    let pool = memory_pool().await;
    create_test_table(&pool).await;

    let insert = binding(
        &pool,
        "INSERT INTO test_table (name) VALUES (:a), (:b), (:c)",
        &params! { "a" => "x", "b" => "y", "c" => "z" },
        "insert".parse()?,
    )
    .await?;
    assert!(matches!(insert, Outcome::Success(true)));

    let update = binding(
        &pool,
        "UPDATE test_table SET name = :name WHERE id IN ([:ids])",
        &params! { "name" => "w", "ids" => [1, 2] },
        "update".parse()?,
    )
    .await?;
    assert_eq!(update.rows_affected(), Some(2));

    let delete = binding(
        &pool,
        "DELETE FROM test_table WHERE name = :name",
        &params! { "name" => "w" },
        "delete".parse()?,
    )
    .await?;
    assert_eq!(delete.rows_affected(), Some(2));
    Ok(())
}

#[tokio::test]
async fn test_binding_as_and_one() -> Result<(), Error> {
    let pool = memory_pool().await;
    create_test_table(&pool).await;

    binding(
        &pool,
        "INSERT INTO test_table (id, name) VALUES (:id1, :name1), (:id2, :name2), (:id3, :name3)",
        &params! {
            "id1" => 1, "name1" => "alpha",
            "id2" => 2, "name2" => "beta",
            "id3" => 3, "name3" => "gamma",
        },
        StatementKind::Insert,
    )
    .await?;

    let rows: Vec<TestRow> = binding_as(
        &pool,
        "SELECT id, name FROM test_table WHERE id IN ([:ids]) ORDER BY id",
        &params! { "ids" => [1, 3] },
    )
    .await?;
    assert_eq!(
        rows,
        vec![
            TestRow { id: 1, name: Some("alpha".to_string()) },
            TestRow { id: 3, name: Some("gamma".to_string()) },
        ]
    );

    let found: Option<TestRow> = binding_one(
        &pool,
        "SELECT id, name FROM test_table WHERE name = :name",
        &params! { "name" => "beta" },
    )
    .await?;
    assert_eq!(found.map(|row| row.id), Some(2));

    let missing: Option<TestRow> = binding_one(
        &pool,
        "SELECT id, name FROM test_table WHERE name = :name",
        &params! { "name" => "delta" },
    )
    .await?;
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn test_null_binding() -> Result<(), Error> {
    let pool = memory_pool().await;
    create_test_table(&pool).await;

    let name: Option<&str> = None;
    binding(
        &pool,
        "INSERT INTO test_table (id, name) VALUES (:id, :name)",
        &Params::new().bind("id", 10).bind("name", name),
        StatementKind::Insert,
    )
    .await?;

    let rows: Vec<TestRow> = binding_as(
        &pool,
        "SELECT id, name FROM test_table WHERE name IS NULL",
        &Params::new(),
    )
    .await?;
    assert_eq!(rows, vec![TestRow { id: 10, name: None }]);
    Ok(())
}

#[tokio::test]
async fn test_runs_inside_caller_transaction() -> Result<(), Error> {
    let pool = memory_pool().await;
    create_test_table(&pool).await;

    let mut tx = pool.begin().await?;
    binding(
        &mut *tx,
        "INSERT INTO test_table (name) VALUES (:name)",
        &params! { "name" => "rolled back" },
        StatementKind::Insert,
    )
    .await?;
    tx.rollback().await?;

    let rows = binding(&pool, "SELECT COUNT(*) as count FROM test_table", &Params::new(), StatementKind::Select)
        .await?
        .into_rows();
    assert_eq!(rows[0].get::<i64, _>("count"), 0);
    Ok(())
}

#[tokio::test]
async fn test_list_in_bare_placeholder_is_rejected() {
    let pool = memory_pool().await;

    let result = binding(
        &pool,
        "SELECT :a AS a, :ids AS ids",
        &params! { "a" => 1, "ids" => [1, 2] },
        StatementKind::Select,
    )
    .await;

    match result {
        Err(Error::ListInScalarPosition { position }) => assert_eq!(position, 2),
        Err(other) => panic!("Expected ListInScalarPosition, got {:?}", other),
        Ok(_) => panic!("Expected ListInScalarPosition, got rows"),
    }
}

#[tokio::test]
async fn test_database_errors_propagate() {
    let pool = memory_pool().await;

    let result = binding(
        &pool,
        "SELECT * FROM no_such_table WHERE id = :id",
        &params! { "id" => 1 },
        StatementKind::Select,
    )
    .await;

    match result {
        Err(Error::Database(err)) => assert!(err.to_string().contains("no_such_table")),
        Err(other) => panic!("Expected Database error, got {:?}", other),
        Ok(_) => panic!("Expected Database error, got rows"),
    }
}
