//! PostgreSQL catalog reader.
//!
//! Reads the rows the core snapshot builder needs from
//! `information_schema` and `pg_catalog`. Every value is cast to a plain
//! text or integer type in SQL so decoding stays independent of the
//! catalog's internal types; arrays arrive in their text form and go
//! through the core array-literal parser.

use oxide_pgdiff_core::array::parse_array_literal;
use oxide_pgdiff_core::catalog::{
    load_schema, CatalogRows, Introspect, RawColumn, RawConstraint, RawTable, RawType,
};
use oxide_pgdiff_core::{DiffError, Schema};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::error::Result;

const TYPES_SQL: &str = r"
SELECT
  t.typname::text,
  t.typtype = 'e',
  COALESCE(
    (SELECT array_agg(e.enumlabel ORDER BY e.enumsortorder)
       FROM pg_catalog.pg_enum e
      WHERE e.enumtypid = t.oid),
    '{}'
  )::text
FROM pg_catalog.pg_type t
JOIN pg_catalog.pg_namespace n ON n.oid = t.typnamespace
WHERE n.nspname = $1
  AND (t.typtype IN ('e', 'd', 'r')
       OR (t.typtype = 'c' AND EXISTS (
             SELECT 1 FROM pg_catalog.pg_class c
              WHERE c.oid = t.typrelid AND c.relkind = 'c')))
ORDER BY t.typname
";

const TABLES_SQL: &str = r"
SELECT
  t.table_name::text,
  t.table_type::text,
  t.table_schema::text,
  t.table_catalog::text,
  v.view_definition::text
FROM information_schema.tables t
LEFT JOIN information_schema.views v
  ON v.table_catalog = t.table_catalog
 AND v.table_schema = t.table_schema
 AND v.table_name = t.table_name
WHERE t.table_catalog = $1
  AND t.table_schema = $2
ORDER BY t.table_name
";

const COLUMNS_SQL: &str = r"
SELECT
  table_name::text,
  column_name::text,
  ordinal_position::int4,
  column_default::text,
  is_nullable = 'YES',
  quote_ident(udt_name::text),
  character_maximum_length::int4,
  numeric_precision::int4,
  numeric_scale::int4
FROM information_schema.columns
WHERE table_catalog = $1
  AND table_schema = $2
ORDER BY table_name, ordinal_position
";

const CONSTRAINTS_SQL: &str = r"
SELECT
  c.conname::text,
  c.contype::text,
  cl.relname::text,
  fcl.relname::text,
  c.conkey::text,
  c.confkey::text
FROM pg_catalog.pg_constraint c
JOIN pg_catalog.pg_class cl ON cl.oid = c.conrelid
JOIN pg_catalog.pg_namespace n ON n.oid = cl.relnamespace
LEFT JOIN pg_catalog.pg_class fcl ON fcl.oid = c.confrelid
WHERE n.nspname = $1
  AND cl.relkind IN ('r', 'p')
ORDER BY cl.relname, c.conname
";

const SEQUENCES_SQL: &str = r"
SELECT sequencename::text
FROM pg_catalog.pg_sequences
WHERE schemaname = $1
ORDER BY sequencename
";

type TypeRow = (String, bool, String);
type TableRow = (String, String, String, String, Option<String>);
type ColumnRow = (
    String,
    String,
    i32,
    Option<String>,
    bool,
    String,
    Option<i32>,
    Option<i32>,
    Option<i32>,
);
type ConstraintRow = (String, String, String, Option<String>, Option<String>, Option<String>);

/// Reads catalog rows over a connection pool bound to one database.
#[derive(Debug, Clone)]
pub struct PgCatalogReader {
    pool: PgPool,
}

impl PgCatalogReader {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database` with the given settings.
    ///
    /// # Errors
    ///
    /// Fails on invalid settings or if the server cannot be reached.
    pub async fn connect(config: &ConnectionConfig, database: &str) -> Result<Self> {
        let options = config.connect_options(database)?;
        debug!(host = %config.host, port = config.port, database, "Connecting");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn read_types(&self, schema: &str) -> Result<Vec<RawType>> {
        let rows: Vec<TypeRow> = sqlx::query_as(TYPES_SQL)
            .bind(schema)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|(name, is_enum, labels)| {
                Ok(RawType {
                    name,
                    is_enum,
                    labels: decode_array(Some(labels.as_str()))?,
                })
            })
            .collect()
    }

    async fn read_tables(&self, catalog: &str, schema: &str) -> Result<Vec<RawTable>> {
        let rows: Vec<TableRow> = sqlx::query_as(TABLES_SQL)
            .bind(catalog)
            .bind(schema)
            .fetch_all(&self.pool)
            .await?;
        let mut tables: Vec<RawTable> = rows
            .into_iter()
            .map(|(name, kind, schema, catalog, view_definition)| RawTable {
                name,
                kind,
                schema,
                catalog,
                view_definition,
                columns: Vec::new(),
            })
            .collect();

        let columns: Vec<ColumnRow> = sqlx::query_as(COLUMNS_SQL)
            .bind(catalog)
            .bind(schema)
            .fetch_all(&self.pool)
            .await?;
        for (table, name, position, default, nullable, data_type, length, precision, scale) in
            columns
        {
            let Some(owner) = tables.iter_mut().find(|t| t.name == table) else {
                continue;
            };
            owner.columns.push(RawColumn {
                name,
                position,
                default,
                nullable,
                data_type,
                length,
                numeric_precision: precision,
                numeric_scale: scale,
            });
        }
        Ok(tables)
    }

    async fn read_constraints(&self, schema: &str) -> Result<Vec<RawConstraint>> {
        let rows: Vec<ConstraintRow> = sqlx::query_as(CONSTRAINTS_SQL)
            .bind(schema)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|(name, kind, table, foreign_table, keys, foreign_keys)| {
                Ok(RawConstraint {
                    name,
                    kind,
                    table,
                    foreign_table,
                    keys: decode_array(keys.as_deref())?,
                    foreign_keys: decode_array(foreign_keys.as_deref())?,
                })
            })
            .collect()
    }

    async fn read_sequences(&self, schema: &str) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(SEQUENCES_SQL)
            .bind(schema)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}

/// Decodes a nullable array literal; NULL is the empty array.
fn decode_array(text: Option<&str>) -> Result<Vec<String>> {
    match text {
        Some(text) => Ok(parse_array_literal(text).map_err(DiffError::from)?),
        None => Ok(Vec::new()),
    }
}

impl Introspect for PgCatalogReader {
    type Error = crate::error::PgDiffError;

    async fn introspect(&self, catalog: &str, schema: &str) -> Result<CatalogRows> {
        let types = self.read_types(schema).await?;
        let tables = self.read_tables(catalog, schema).await?;
        let constraints = self.read_constraints(schema).await?;
        let sequences = self.read_sequences(schema).await?;
        debug!(
            catalog,
            types = types.len(),
            tables = tables.len(),
            constraints = constraints.len(),
            sequences = sequences.len(),
            "Read catalog rows"
        );
        Ok(CatalogRows {
            types,
            tables,
            constraints,
            sequences,
        })
    }
}

/// Connects to `database`, reads `schema` and builds its snapshot.
///
/// # Errors
///
/// Fails if the database cannot be read or its rows are inconsistent.
pub async fn read_schema(config: &ConnectionConfig, database: &str, schema: &str) -> Result<Schema> {
    let reader = PgCatalogReader::connect(config, database).await?;
    let snapshot = load_schema(&reader, database, schema).await;
    reader.pool.close().await;
    snapshot
}
