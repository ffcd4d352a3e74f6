//! Writing migration scripts to disk.

mod common;

use common::*;
use oxide_pgdiff::prelude::*;
use oxide_pgdiff_core::catalog::load_schema;

async fn script() -> MigrationScript {
    let source = fake_catalog();
    let desired = load_schema(&source, "staging", "public").await.unwrap();
    let current = load_schema(&source, "production", "public").await.unwrap();
    let diff = SchemaDiffer::new().diff(&desired, &current).unwrap();
    MigrationScript::new("staging", "production", "public", diff)
}

#[tokio::test]
async fn writes_sql_script_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("migrate.sql");

    let contents = script()
        .await
        .render(OutputFormat::Sql, Terminator::Rollback)
        .unwrap();
    write_output(&path, &contents).await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("-- Migrate \"production\" to match \"staging\""));
    assert!(written.ends_with(concat!(
        "SET client_min_messages TO WARNING;\n",
        "BEGIN;\n",
        "ALTER TABLE \"users\" ADD COLUMN \"email\" text;\n",
        "DROP TABLE IF EXISTS \"legacy\";\n",
        "ROLLBACK;\n\n"
    )));
}

#[tokio::test]
async fn commit_terminator_is_honoured() {
    let contents = script().await.to_sql(Terminator::Commit);
    assert!(contents.ends_with("COMMIT;\n\n"));
    assert!(!contents.contains("ROLLBACK"));
}

#[tokio::test]
async fn writes_json_report_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("migrate.json");

    let contents = script()
        .await
        .render(OutputFormat::Json, Terminator::Rollback)
        .unwrap();
    write_output(&path, &contents).await.unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let kinds: Vec<&str> = value["statements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["add_column", "drop_table"]);
}

#[tokio::test]
async fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("migrate.sql");
    let err = write_output(&path, "BEGIN;").await.unwrap_err();
    assert!(matches!(err, PgDiffError::Io(_)));
}
