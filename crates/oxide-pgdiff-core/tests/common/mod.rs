#![allow(dead_code)]

use oxide_pgdiff_core::catalog::{CatalogRows, RawColumn, RawConstraint, RawTable, RawType};
use oxide_pgdiff_core::{DiffOptions, Schema, SchemaDiffer};

pub fn raw_column(name: &str, position: i32, data_type: &str) -> RawColumn {
    RawColumn {
        name: name.to_string(),
        position,
        nullable: true,
        data_type: data_type.to_string(),
        ..RawColumn::default()
    }
}

pub fn required(mut column: RawColumn) -> RawColumn {
    column.nullable = false;
    column
}

pub fn with_default(mut column: RawColumn, default: &str) -> RawColumn {
    column.default = Some(default.to_string());
    column
}

pub fn raw_table(name: &str, columns: Vec<RawColumn>) -> RawTable {
    RawTable {
        name: name.to_string(),
        kind: "BASE TABLE".to_string(),
        schema: "public".to_string(),
        catalog: "shop".to_string(),
        view_definition: None,
        columns,
    }
}

pub fn raw_view(name: &str, body: &str, columns: Vec<RawColumn>) -> RawTable {
    RawTable {
        kind: "VIEW".to_string(),
        view_definition: Some(body.to_string()),
        ..raw_table(name, columns)
    }
}

pub fn raw_constraint(name: &str, code: &str, table: &str, keys: &[&str]) -> RawConstraint {
    RawConstraint {
        name: name.to_string(),
        kind: code.to_string(),
        table: table.to_string(),
        foreign_table: None,
        keys: keys.iter().map(ToString::to_string).collect(),
        foreign_keys: Vec::new(),
    }
}

pub fn raw_foreign_key(
    name: &str,
    table: &str,
    keys: &[&str],
    foreign_table: &str,
    foreign_keys: &[&str],
) -> RawConstraint {
    RawConstraint {
        foreign_table: Some(foreign_table.to_string()),
        foreign_keys: foreign_keys.iter().map(ToString::to_string).collect(),
        ..raw_constraint(name, "f", table, keys)
    }
}

pub fn raw_enum(name: &str, labels: &[&str]) -> RawType {
    RawType {
        name: name.to_string(),
        is_enum: true,
        labels: labels.iter().map(ToString::to_string).collect(),
    }
}

/// A small shop schema: users, orders referencing users, an enum and a view.
pub fn shop_rows() -> CatalogRows {
    CatalogRows {
        types: vec![raw_enum("order_status", &["pending", "shipped"])],
        tables: vec![
            raw_table(
                "users",
                vec![
                    with_default(
                        required(raw_column("id", 1, "int4")),
                        "nextval('users_id_seq'::regclass)",
                    ),
                    required(raw_column("email", 2, "text")),
                ],
            ),
            raw_table(
                "orders",
                vec![
                    with_default(
                        required(raw_column("id", 1, "int4")),
                        r#"nextval('"orders_id_seq"'::regclass)"#,
                    ),
                    required(raw_column("user_id", 2, "int4")),
                    with_default(
                        raw_column("status", 3, "order_status"),
                        "'pending'::order_status",
                    ),
                ],
            ),
            raw_view(
                "recent_orders",
                "SELECT orders.id FROM orders;",
                vec![raw_column("id", 1, "int4")],
            ),
        ],
        constraints: vec![
            raw_constraint("users_pkey", "p", "users", &["1"]),
            raw_constraint("users_email_key", "u", "users", &["2"]),
            raw_constraint("orders_pkey", "p", "orders", &["1"]),
            raw_foreign_key("orders_user_fk", "orders", &["2"], "users", &["1"]),
        ],
        sequences: vec!["users_id_seq".to_string(), "orders_id_seq".to_string()],
    }
}

pub fn single_table(table: RawTable) -> CatalogRows {
    CatalogRows {
        tables: vec![table],
        ..CatalogRows::default()
    }
}

pub fn without_views(mut rows: CatalogRows) -> CatalogRows {
    rows.tables.retain(|t| t.kind != "VIEW");
    rows
}

pub fn build(catalog: &str, rows: &CatalogRows) -> Schema {
    Schema::from_catalog(catalog, "public", rows)
        .unwrap_or_else(|e| panic!("Failed to build {catalog}: {e}"))
}

pub fn diff_sql(desired: &Schema, current: &Schema) -> Vec<String> {
    diff_sql_with(desired, current, DiffOptions::default())
}

pub fn diff_sql_with(desired: &Schema, current: &Schema, options: DiffOptions) -> Vec<String> {
    SchemaDiffer::with_options(options)
        .diff(desired, current)
        .unwrap_or_else(|e| panic!("Diff failed: {e}"))
        .iter()
        .map(ToString::to_string)
        .collect()
}
