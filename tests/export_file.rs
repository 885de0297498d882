//! Tests for exporting a column to a file.

use std::time::Duration;

use column_export::{
    column_names, export, export_with_pool, ExportError, ExportRequest, QueryError,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

#[path = "helpers.rs"]
mod helpers;

use helpers::{create_temp_db, create_test_db, create_writable_pool, ABC};

fn request_for(db: &std::path::Path, out: &std::path::Path) -> ExportRequest {
    ExportRequest::new(db, "t", "v", out)
}

#[tokio::test]
async fn test_export_scenario_unbounded_and_batched() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out_unbounded = temp_dir.path().join("unbounded.txt");
    let out_batched = temp_dir.path().join("batched.txt");

    let rows = export(&request_for(&db_path, &out_unbounded).with_condition("id<=2"))
        .await
        .expect("Unbounded export failed");
    assert_eq!(rows, 2);
    assert_eq!(std::fs::read_to_string(&out_unbounded).unwrap(), "ab");

    let request = request_for(&db_path, &out_batched)
        .with_condition("id<=2")
        .with_batch_size(1)
        .unwrap();
    let rows = export(&request).await.expect("Batched export failed");
    assert_eq!(rows, 2);
    assert_eq!(std::fs::read_to_string(&out_batched).unwrap(), "ab");
}

#[tokio::test]
async fn test_strategies_are_byte_identical() {
    let values = ["alpha\n", "", "gamma", "δέλτα", "eps\0ilon", "zeta", "eta"];
    let (temp_dir, db_path) = create_temp_db(&values).await;

    let unbounded_path = temp_dir.path().join("unbounded.txt");
    let rows = export(&request_for(&db_path, &unbounded_path).with_condition("id > 1"))
        .await
        .expect("Unbounded export failed");
    assert_eq!(rows, values.len() - 1);
    let unbounded = std::fs::read(&unbounded_path).unwrap();
    assert_eq!(unbounded, values[1..].concat().as_bytes());

    for size in [1, 2, 3, values.len() as i64 + 10] {
        let path = temp_dir.path().join(format!("batch_{size}.txt"));
        let request = request_for(&db_path, &path)
            .with_condition("id > 1")
            .with_batch_size(size)
            .unwrap();
        let rows = export(&request).await.expect("Batched export failed");
        assert_eq!(rows, values.len() - 1, "batch size {size}");
        assert_eq!(
            std::fs::read(&path).unwrap(),
            unbounded,
            "batch size {size} changed the output"
        );
    }
}

#[tokio::test]
async fn test_every_matching_row_exactly_once() {
    let values: Vec<String> = (0..25).map(|i| format!("<{i}>")).collect();
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    let (temp_dir, db_path) = create_temp_db(&refs).await;
    let out = temp_dir.path().join("odd.txt");

    let request = request_for(&db_path, &out)
        .with_condition("tag = ?")
        .with_param("odd")
        .with_batch_size(4)
        .unwrap();
    let rows = export(&request).await.expect("Export failed");

    let expected: String = values.iter().skip(1).step_by(2).cloned().collect();
    assert_eq!(rows, 12);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), expected);
}

#[tokio::test]
async fn test_export_is_idempotent_and_truncates() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("out.txt");
    std::fs::write(&out, "a much longer stale file").unwrap();

    let request = request_for(&db_path, &out);
    export(&request).await.expect("First export failed");
    let first = std::fs::read(&out).unwrap();
    export(&request).await.expect("Second export failed");
    let second = std::fs::read(&out).unwrap();

    assert_eq!(first, b"abc");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_batch_size_rejected_before_connecting() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("never_opened.db");
    let out = temp_dir.path().join("out.txt");

    for n in [0, -1] {
        let result = request_for(&db_path, &out).with_batch_size(n);
        assert!(
            matches!(result, Err(ExportError::InvalidConfiguration(_))),
            "batch size {n} should be rejected"
        );
    }
    assert!(!db_path.exists());
    assert!(!out.exists());
}

#[tokio::test]
async fn test_empty_request_fields_rejected_before_connecting() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("never_opened.db");
    let out = temp_dir.path().join("out.txt");

    let request = ExportRequest::new(&db_path, "", "v", &out);
    let result = export(&request).await;

    assert!(matches!(result, Err(ExportError::InvalidConfiguration(_))));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_connection_released_when_destination_unwritable() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("no_such_dir").join("out.txt");

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .expect("Failed to open pool");

    let result = export_with_pool(&pool, &request_for(&db_path, &out)).await;
    assert!(matches!(result, Err(ExportError::WriteError { .. })));

    // With a single-connection pool this only succeeds if the export gave its connection back
    let conn = pool
        .acquire()
        .await
        .expect("Connection was not released after a write failure");
    drop(conn);
    pool.close().await;
    assert!(pool.is_closed());
}

#[tokio::test]
async fn test_empty_result_writes_empty_file() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("empty.txt");

    let rows = export(&request_for(&db_path, &out).with_condition("id > 100"))
        .await
        .expect("Export failed");

    assert_eq!(rows, 0);
    assert!(out.exists());
    assert_eq!(std::fs::metadata(&out).unwrap().len(), 0);
}

#[tokio::test]
async fn test_missing_database_is_connection_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("missing.db");
    let out = temp_dir.path().join("out.txt");

    let result = export(&request_for(&db_path, &out)).await;

    assert!(matches!(result, Err(ExportError::ConnectionError(_))));
    assert!(!db_path.exists(), "the database must not be created");
    assert!(!out.exists(), "no output before a connection exists");
}

#[tokio::test]
async fn test_unknown_table_and_column_fail_before_writing() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("out.txt");

    let result = export(&ExportRequest::new(&db_path, "t; DROP TABLE t", "v", &out)).await;
    assert!(matches!(
        result,
        Err(ExportError::QueryError(QueryError::UnknownTable(_)))
    ));

    let result = export(&ExportRequest::new(&db_path, "t", "missing", &out)).await;
    assert!(matches!(
        result,
        Err(ExportError::QueryError(QueryError::UnknownColumn { .. }))
    ));

    assert!(!out.exists());
    assert_eq!(
        column_names(&db_path, "t").await.unwrap(),
        vec!["id", "v", "tag"],
        "the source table must be untouched"
    );
}

#[tokio::test]
async fn test_malformed_condition_fails_before_writing() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("out.txt");

    let result = export(&request_for(&db_path, &out).with_condition("id <=")).await;
    assert!(matches!(
        result,
        Err(ExportError::QueryError(QueryError::SqlError(_)))
    ));

    let result = export(&request_for(&db_path, &out).with_condition("nope = 1")).await;
    assert!(matches!(
        result,
        Err(ExportError::QueryError(QueryError::SqlError(_)))
    ));

    assert!(!out.exists());
}

#[tokio::test]
async fn test_multi_statement_condition_rejected() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("out.txt");

    for condition in [
        "id<=2; SELECT name FROM sqlite_master",
        "id<=2;",
        "1) UNION SELECT name FROM sqlite_master WHERE (1",
    ] {
        let result = export(&request_for(&db_path, &out).with_condition(condition)).await;
        assert!(
            matches!(
                result,
                Err(ExportError::QueryError(QueryError::UnboundedCondition(_)))
            ),
            "{condition}: {result:?}"
        );
        assert!(!out.exists(), "{condition} created the destination");
    }
}

#[tokio::test]
async fn test_condition_with_quoted_separator_and_comment() {
    let (temp_dir, db_path) = create_temp_db(&["a;b", "c", "d"]).await;
    let out = temp_dir.path().join("out.txt");

    let rows = export(&request_for(&db_path, &out).with_condition("v = 'a;b' OR id = 3"))
        .await
        .expect("Export failed");
    assert_eq!(rows, 2);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "a;bd");

    let rows = export(&request_for(&db_path, &out).with_condition("id <= 2 -- first two"))
        .await
        .expect("Export failed");
    assert_eq!(rows, 2);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "a;bc");
}

#[tokio::test]
async fn test_error_while_stepping_rows_keeps_partial_output() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("partial.txt");

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .expect("Failed to open pool");

    // abs() of the smallest i64 overflows, but only once row 3 is evaluated
    let request = request_for(&db_path, &out)
        .with_condition("CASE WHEN id = 3 THEN abs(-9223372036854775808) ELSE 1 END");
    let result = export_with_pool(&pool, &request).await;
    assert!(
        matches!(result, Err(ExportError::QueryError(QueryError::SqlError(_)))),
        "{result:?}"
    );
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "ab");

    let conn = pool
        .acquire()
        .await
        .expect("Connection was not released after a query failure");
    drop(conn);
    pool.close().await;
}

#[tokio::test]
async fn test_parameter_count_mismatch() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("out.txt");

    let request = request_for(&db_path, &out)
        .with_condition("id = ? AND tag = ?")
        .with_param(1);
    let result = export(&request).await;

    assert!(matches!(
        result,
        Err(ExportError::QueryError(QueryError::ParameterCount {
            expected: 2,
            given: 1
        }))
    ));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_identifiers_are_case_insensitive() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("out.txt");

    let rows = export(&ExportRequest::new(&db_path, "T", "V", &out))
        .await
        .expect("Export failed");

    assert_eq!(rows, 3);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "abc");
}

#[tokio::test]
async fn test_separator_is_opt_in() {
    let (temp_dir, db_path) = create_temp_db(ABC).await;
    let out = temp_dir.path().join("lines.txt");

    let request = request_for(&db_path, &out)
        .with_separator("\n")
        .with_batch_size(2)
        .unwrap();
    let rows = export(&request).await.expect("Export failed");

    assert_eq!(rows, 3);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "a\nb\nc");
}

#[tokio::test]
async fn test_mixed_storage_classes() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("mixed.db");
    let pool = create_writable_pool(&db_path).await;
    sqlx::query("CREATE TABLE m (id INTEGER PRIMARY KEY, content)")
        .execute(&pool)
        .await
        .expect("Failed to create table");
    sqlx::query("INSERT INTO m (content) VALUES ('x'), (7), (NULL), (x'4142'), (1.5)")
        .execute(&pool)
        .await
        .expect("Failed to insert rows");
    pool.close().await;

    let out = temp_dir.path().join("mixed.txt");
    let rows = export(&ExportRequest::new(&db_path, "m", "content", &out))
        .await
        .expect("Export failed");

    assert_eq!(rows, 5, "NULL rows are counted");
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "x7AB1.5");
}

#[tokio::test]
async fn test_column_names() {
    let (_temp_dir, db_path) = create_temp_db(ABC).await;

    assert_eq!(
        column_names(&db_path, "t").await.unwrap(),
        vec!["id", "v", "tag"]
    );
    assert!(matches!(
        column_names(&db_path, "missing").await,
        Err(ExportError::QueryError(QueryError::UnknownTable(_)))
    ));
}

#[tokio::test]
async fn test_export_from_view() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("view.db");
    create_test_db(&db_path, ABC).await;
    let pool = create_writable_pool(&db_path).await;
    sqlx::query("CREATE VIEW upper_v AS SELECT id, upper(v) AS u FROM t")
        .execute(&pool)
        .await
        .expect("Failed to create view");
    pool.close().await;

    let out = temp_dir.path().join("view.txt");
    let rows = export(&ExportRequest::new(&db_path, "upper_v", "u", &out).with_condition("id >= 2"))
        .await
        .expect("Export failed");

    assert_eq!(rows, 2);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "BC");
}
