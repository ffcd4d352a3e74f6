#![allow(dead_code)]

use std::collections::HashMap;

use oxide_pgdiff::PgDiffError;
use oxide_pgdiff_core::catalog::{CatalogRows, Introspect, RawColumn, RawConstraint, RawTable};

/// An in-memory catalog source keyed by database name.
#[derive(Default)]
pub struct FakeCatalog {
    databases: HashMap<String, CatalogRows>,
}

impl FakeCatalog {
    pub fn with(mut self, database: &str, rows: CatalogRows) -> Self {
        self.databases.insert(database.to_string(), rows);
        self
    }
}

impl Introspect for FakeCatalog {
    type Error = PgDiffError;

    async fn introspect(&self, catalog: &str, _schema: &str) -> Result<CatalogRows, PgDiffError> {
        self.databases
            .get(catalog)
            .cloned()
            .ok_or_else(|| PgDiffError::Database(sqlx::Error::RowNotFound))
    }
}

pub fn column(name: &str, position: i32, data_type: &str, nullable: bool) -> RawColumn {
    RawColumn {
        name: name.to_string(),
        position,
        nullable,
        data_type: data_type.to_string(),
        ..RawColumn::default()
    }
}

pub fn table(name: &str, columns: Vec<RawColumn>) -> RawTable {
    RawTable {
        name: name.to_string(),
        kind: "BASE TABLE".to_string(),
        schema: "public".to_string(),
        catalog: String::new(),
        view_definition: None,
        columns,
    }
}

pub fn primary_key(name: &str, table: &str, keys: &[&str]) -> RawConstraint {
    RawConstraint {
        name: name.to_string(),
        kind: "p".to_string(),
        table: table.to_string(),
        foreign_table: None,
        keys: keys.iter().map(ToString::to_string).collect(),
        foreign_keys: Vec::new(),
    }
}

/// `users(id, email)` in staging, `users(id)` plus `legacy(id)` in production.
pub fn fake_catalog() -> FakeCatalog {
    let staging = CatalogRows {
        tables: vec![table(
            "users",
            vec![
                column("id", 1, "int4", false),
                column("email", 2, "text", true),
            ],
        )],
        constraints: vec![primary_key("users_pkey", "users", &["1"])],
        ..CatalogRows::default()
    };
    let production = CatalogRows {
        tables: vec![
            table("users", vec![column("id", 1, "int4", false)]),
            table("legacy", vec![column("id", 1, "int4", false)]),
        ],
        constraints: vec![primary_key("users_pkey", "users", &["1"])],
        ..CatalogRows::default()
    };
    FakeCatalog::default()
        .with("staging", staging)
        .with("production", production)
}
