//! End-to-end tests: catalog rows to snapshots to statement stream.

mod common;

use std::collections::BTreeSet;

use common::*;
use oxide_pgdiff_core::diff::{difference_by_name, intersection_by_name};
use oxide_pgdiff_core::{DiffOptions, Schema, SchemaDiffer, Statement};

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn identical_schemas_produce_no_statements() {
    let rows = without_views(shop_rows());
    let desired = build("staging", &rows);
    let current = build("production", &rows);
    assert!(SchemaDiffer::new().diff(&desired, &current).unwrap().is_empty());
}

#[test]
fn identical_schemas_with_every_option_produce_no_statements() {
    let rows = without_views(shop_rows());
    let options = DiffOptions::new()
        .with_strict_unique()
        .with_numeric_precision()
        .with_restore_literal_defaults();
    assert!(diff_sql_with(&build("a", &rows), &build("b", &rows), options).is_empty());
}

#[test]
fn identical_views_are_recreated() {
    let rows = shop_rows();
    assert_eq!(
        diff_sql(&build("staging", &rows), &build("production", &rows)),
        vec![
            r#"DROP VIEW IF EXISTS "recent_orders" CASCADE;"#,
            r#"CREATE OR REPLACE VIEW "recent_orders" AS SELECT orders.id FROM orders;"#,
        ]
    );
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn added_column_is_the_only_statement() {
    let desired = single_table(raw_table(
        "users",
        vec![raw_column("id", 1, "int4"), raw_column("email", 2, "text")],
    ));
    let current = single_table(raw_table("users", vec![raw_column("id", 1, "int4")]));

    assert_eq!(
        diff_sql(&build("staging", &desired), &build("production", &current)),
        vec![r#"ALTER TABLE "users" ADD COLUMN "email" text;"#]
    );
}

#[test]
fn obsolete_table_is_dropped() {
    let desired = build("staging", &without_views(shop_rows()));
    let mut rows = without_views(shop_rows());
    rows.tables.push(raw_table(
        "legacy",
        vec![required(raw_column("id", 1, "int4")), raw_column("note", 2, "text")],
    ));
    let current = build("production", &rows);

    let out = diff_sql(&desired, &current);
    assert_eq!(out, vec![r#"DROP TABLE IF EXISTS "legacy";"#]);
    assert!(out.iter().all(|s| !s.contains("ADD COLUMN") && !s.contains("ALTER")));
}

#[test]
fn empty_current_schema_is_built_from_scratch() {
    let desired = build("staging", &shop_rows());
    let current = Schema::new("production", "public");
    let out = diff_sql(&desired, &current);

    assert_eq!(out[0], r#"CREATE SEQUENCE "users_id_seq";"#);
    assert_eq!(out[1], r#"CREATE SEQUENCE "orders_id_seq";"#);
    assert_eq!(out[2], r#"CREATE TYPE "order_status" AS ENUM ('pending', 'shipped');"#);
    assert_eq!(
        out[3],
        concat!(
            "CREATE TABLE \"users\" (\n",
            "  \"id\" int4 DEFAULT NEXTVAL('\"users_id_seq\"') NOT NULL,\n",
            "  \"email\" text NOT NULL,\n",
            "  CONSTRAINT \"users_pkey\" PRIMARY KEY (\"id\"),\n",
            "  CONSTRAINT \"users_email_key\" UNIQUE (\"email\")\n",
            ");"
        )
    );
    assert!(out[4].starts_with(r#"CREATE TABLE "orders""#));
    assert!(out[4].contains(r#""status" order_status DEFAULT 'pending'::order_status"#));
    assert!(!out[4].contains("FOREIGN KEY"));
    assert_eq!(
        out[5],
        r#"CREATE OR REPLACE VIEW "recent_orders" AS SELECT orders.id FROM orders;"#
    );
    assert_eq!(
        out[6],
        r#"ALTER TABLE "orders" ADD CONSTRAINT "orders_user_fk" FOREIGN KEY ("user_id") REFERENCES "users" ("id");"#
    );
    assert_eq!(out.len(), 7);
}

#[test]
fn everything_is_dropped_against_empty_desired() {
    let desired = Schema::new("staging", "public");
    let current = build("production", &shop_rows());
    assert_eq!(
        diff_sql(&desired, &current),
        vec![
            r#"DROP TABLE IF EXISTS "users";"#,
            r#"DROP TABLE IF EXISTS "orders";"#,
            r#"DROP VIEW IF EXISTS "recent_orders" CASCADE;"#,
            r#"DROP TYPE "order_status";"#,
        ]
    );
}

#[test]
fn renamed_sequence_and_changed_columns() {
    let desired = build("staging", &without_views(shop_rows()));

    let mut rows = without_views(shop_rows());
    let users = &mut rows.tables[0];
    users.columns[0] = with_default(
        required(raw_column("id", 1, "int4")),
        "nextval('accounts_id_seq'::regclass)",
    );
    users.columns[1] = raw_column("email", 2, "varchar");
    users.columns[1].length = Some(120);
    rows.sequences = vec!["accounts_id_seq".into(), "orders_id_seq".into()];
    let current = build("production", &rows);

    assert_eq!(
        diff_sql(&desired, &current),
        vec![
            r#"CREATE SEQUENCE "users_id_seq";"#,
            r#"DROP SEQUENCE IF EXISTS "users_id_seq";"#,
            r#"ALTER SEQUENCE "accounts_id_seq" RENAME TO "users_id_seq";"#,
            r#"ALTER TABLE "users" ALTER COLUMN "email" SET NOT NULL;"#,
            r#"ALTER TABLE "users" ALTER COLUMN "email" TYPE text USING "email"::text;"#,
        ]
    );
}

#[test]
fn constraint_changes_are_added_and_dropped() {
    let desired = build("staging", &without_views(shop_rows()));

    let mut rows = without_views(shop_rows());
    rows.constraints.retain(|c| c.name != "orders_user_fk");
    rows.constraints
        .push(raw_constraint("orders_status_check", "c", "orders", &["3"]));
    let current = build("production", &rows);

    assert_eq!(
        diff_sql(&desired, &current),
        vec![
            r#"ALTER TABLE "orders" ADD CONSTRAINT "orders_user_fk" FOREIGN KEY ("user_id") REFERENCES "users" ("id");"#,
            r#"ALTER TABLE "orders" DROP CONSTRAINT IF EXISTS "orders_status_check";"#,
        ]
    );
}

#[test]
fn diff_serializes_to_json() {
    let desired = build("staging", &without_views(shop_rows()));
    let current = Schema::new("production", "public");
    let diff = SchemaDiffer::new().diff(&desired, &current).unwrap();
    let json = serde_json::to_value(&diff).unwrap();
    let kinds: Vec<&str> = json["statements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "create_sequence",
            "create_sequence",
            "create_enum",
            "create_table",
            "create_table",
            "add_constraint",
        ]
    );
    assert!(matches!(diff.statements()[2], Statement::CreateEnum { .. }));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn add_drop_and_common_sets_partition_all_names() {
    let desired = build("staging", &shop_rows());
    let mut rows = shop_rows();
    rows.tables.remove(0);
    rows.tables.push(raw_table("legacy", vec![raw_column("id", 1, "int4")]));
    rows.constraints.retain(|c| c.table == "orders" && c.kind != "f");
    let current = build("production", &rows);

    let added: BTreeSet<&str> = difference_by_name(&desired.tables, &current.tables)
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    let dropped: BTreeSet<&str> = difference_by_name(&current.tables, &desired.tables)
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    let common: BTreeSet<&str> = intersection_by_name(&desired.tables, &current.tables)
        .iter()
        .map(|(d, _)| d.name.as_str())
        .collect();

    assert!(added.is_disjoint(&dropped));
    assert!(added.is_disjoint(&common));
    assert!(dropped.is_disjoint(&common));

    let all: BTreeSet<&str> = desired.table_names().chain(current.table_names()).collect();
    let union: BTreeSet<&str> = added.union(&dropped).chain(common.iter()).copied().collect();
    assert_eq!(union, all);
}

// =============================================================================
// Catalog failures
// =============================================================================

#[test]
fn unresolved_reference_aborts_build() {
    let mut rows = shop_rows();
    rows.constraints
        .push(raw_foreign_key("orders_coupon_fk", "orders", &["2"], "coupons", &["1"]));
    let err = Schema::from_catalog("shop", "public", &rows).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Constraint 'orders_coupon_fk' refers to table 'coupons' which doesn't exist"
    );
}

#[test]
fn kind_mismatch_aborts_diff() {
    let desired = single_table(raw_table("report", vec![raw_column("id", 1, "int4")]));
    let current = single_table(raw_view("report", "SELECT 1 AS id", vec![]));
    let err = SchemaDiffer::new()
        .diff(&build("staging", &desired), &build("production", &current))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Table 'report' is a base table in the desired schema but a view in the current schema"
    );
}
