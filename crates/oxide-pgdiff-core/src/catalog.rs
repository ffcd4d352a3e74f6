//! Raw catalog rows and the snapshot builder.
//!
//! Driver crates implement [`Introspect`] to read [`CatalogRows`] from a
//! live database. The core only turns those rows into a [`Schema`], so it
//! stays driver-agnostic and free of I/O.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::error::{DiffError, Result};
use crate::model::{
    Column, Constraint, ConstraintKind, DefaultValue, Schema, Sequence, Table, TableKind,
    UserType,
};

/// A user-defined type row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawType {
    /// Type name.
    pub name: String,
    /// Whether the type is an enumeration.
    pub is_enum: bool,
    /// Enum labels in sort order.
    pub labels: Vec<String>,
}

/// A column row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawColumn {
    /// Column name.
    pub name: String,
    /// 1-based ordinal position.
    pub position: i32,
    /// Default expression text, if any.
    pub default: Option<String>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Quoted base type name.
    pub data_type: String,
    /// Maximum character length.
    pub length: Option<i32>,
    /// Numeric precision.
    pub numeric_precision: Option<i32>,
    /// Numeric scale.
    pub numeric_scale: Option<i32>,
}

/// A table or view row with its columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Table name.
    pub name: String,
    /// `information_schema` table type, e.g. `BASE TABLE` or `VIEW`.
    pub kind: String,
    /// Schema name.
    pub schema: String,
    /// Catalog name.
    pub catalog: String,
    /// View body, for views.
    pub view_definition: Option<String>,
    /// Columns, in any order.
    pub columns: Vec<RawColumn>,
}

/// A constraint row. Key columns are given as ordinal positions in text
/// form, as decoded from the catalog's array literals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConstraint {
    /// Constraint name.
    pub name: String,
    /// `pg_constraint.contype` code.
    pub kind: String,
    /// Owning table name.
    pub table: String,
    /// Referenced table name, for foreign keys.
    pub foreign_table: Option<String>,
    /// Ordinal positions of the local key columns.
    pub keys: Vec<String>,
    /// Ordinal positions of the referenced key columns.
    pub foreign_keys: Vec<String>,
}

/// Everything a catalog reader returns for one catalog/schema pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRows {
    /// User-defined types.
    pub types: Vec<RawType>,
    /// Tables and views.
    pub tables: Vec<RawTable>,
    /// Constraints of every table.
    pub constraints: Vec<RawConstraint>,
    /// Names of the sequences in the schema.
    pub sequences: Vec<String>,
}

/// Reads the catalog rows of a live database.
///
/// Implementations live in driver crates (e.g. oxide-pgdiff).
pub trait Introspect {
    /// Error type for introspection failures.
    type Error: std::error::Error;

    /// Reads the rows describing `schema` in `catalog`.
    fn introspect(
        &self,
        catalog: &str,
        schema: &str,
    ) -> impl Future<Output = std::result::Result<CatalogRows, Self::Error>> + Send;
}

/// Reads a catalog through `source` and builds its snapshot.
///
/// # Errors
///
/// Returns the source's error if reading fails, or a [`DiffError`]
/// converted into it if the rows are inconsistent.
pub async fn load_schema<I>(
    source: &I,
    catalog: &str,
    schema: &str,
) -> std::result::Result<Schema, I::Error>
where
    I: Introspect + Sync,
    I::Error: From<DiffError>,
{
    info!(catalog, schema, "Reading catalog");
    let rows = source.introspect(catalog, schema).await?;
    Ok(Schema::from_catalog(catalog, schema, &rows)?)
}

impl Schema {
    /// Builds a snapshot from raw catalog rows.
    ///
    /// Columns are ordered by position and their defaults classified.
    /// Constraints are resolved against the loaded tables and registered
    /// on their key columns; constraints of tables that were not loaded
    /// are skipped. Only sequences some column default draws from are kept.
    ///
    /// # Errors
    ///
    /// Fails if a constraint refers to a missing column position or
    /// referenced table, or a foreign key comes without its referenced table.
    pub fn from_catalog(catalog: &str, schema: &str, rows: &CatalogRows) -> Result<Self> {
        let mut snapshot = Self::new(catalog, schema);

        snapshot.types = rows.types.iter().map(build_type).collect();

        for raw in &rows.tables {
            let Some(kind) = TableKind::from_catalog(&raw.kind) else {
                warn!(table = %raw.name, kind = %raw.kind, "Skipping unsupported table kind");
                continue;
            };
            snapshot.tables.push(build_table(raw, kind));
        }

        for raw in &rows.constraints {
            let Some(kind) = ConstraintKind::from_code(&raw.kind) else {
                debug!(constraint = %raw.name, code = %raw.kind, "Skipping unsupported constraint kind");
                continue;
            };
            let Some(index) = snapshot.tables.iter().position(|t| t.name == raw.table) else {
                debug!(constraint = %raw.name, table = %raw.table, "Skipping constraint of unloaded table");
                continue;
            };
            let constraint = build_constraint(&snapshot, &snapshot.tables[index], raw, kind)?;
            snapshot.tables[index].add_constraint(constraint);
        }

        for name in &rows.sequences {
            if let Some(sequence) = referencing_sequence(&snapshot, name) {
                snapshot.sequences.push(sequence);
            }
        }

        debug!(
            catalog,
            schema,
            tables = snapshot.tables.len(),
            sequences = snapshot.sequences.len(),
            types = snapshot.types.len(),
            "Built schema snapshot"
        );
        Ok(snapshot)
    }
}

fn build_type(raw: &RawType) -> UserType {
    if raw.is_enum {
        UserType::enumeration(raw.name.clone(), raw.labels.iter().cloned())
    } else {
        UserType::other(raw.name.clone())
    }
}

fn build_table(raw: &RawTable, kind: TableKind) -> Table {
    let mut columns: Vec<&RawColumn> = raw.columns.iter().collect();
    columns.sort_by_key(|c| c.position);

    let mut table = Table::new(raw.name.clone());
    table.kind = kind;
    table.schema.clone_from(&raw.schema);
    table.catalog.clone_from(&raw.catalog);
    if kind == TableKind::View {
        table.view_definition = raw
            .view_definition
            .as_deref()
            .map(|body| body.trim().trim_end_matches(';').trim_end().to_string());
    }

    for raw_column in columns {
        table = table.column(build_column(raw_column));
    }
    table
}

fn build_column(raw: &RawColumn) -> Column {
    Column {
        name: raw.name.clone(),
        position: raw.position,
        default: DefaultValue::classify(raw.default.as_deref()),
        nullable: raw.nullable,
        data_type: raw.data_type.clone(),
        length: raw.length,
        numeric_precision: raw.numeric_precision,
        numeric_scale: raw.numeric_scale,
        table: String::new(),
        constraints: Vec::new(),
    }
}

fn resolve_table<'a>(schema: &'a Schema, constraint: &str, table: &str) -> Result<&'a Table> {
    schema
        .table_named(table)
        .ok_or_else(|| DiffError::UnresolvedTable {
            constraint: constraint.to_string(),
            table: table.to_string(),
        })
}

fn resolve_keys<'a>(table: &'a Table, constraint: &str, keys: &[String]) -> Result<Vec<&'a Column>> {
    keys.iter()
        .map(|key| {
            let position: i32 = key.trim().parse().map_err(|_| DiffError::InvalidKeyPosition {
                constraint: constraint.to_string(),
                value: key.clone(),
            })?;
            table
                .column_at(position)
                .ok_or_else(|| DiffError::UnresolvedColumn {
                    constraint: constraint.to_string(),
                    table: table.name.clone(),
                    position,
                })
        })
        .collect()
}

fn build_constraint(
    schema: &Schema,
    table: &Table,
    raw: &RawConstraint,
    kind: ConstraintKind,
) -> Result<Constraint> {
    let keys = resolve_keys(table, &raw.name, &raw.keys)?;

    Ok(match kind {
        ConstraintKind::PrimaryKey => Constraint::primary_key(&raw.name, &raw.table, &keys),
        ConstraintKind::Unique => Constraint::unique(&raw.name, &raw.table, &keys),
        ConstraintKind::Check => Constraint::check(&raw.name, &raw.table, &keys),
        ConstraintKind::ForeignKey => {
            let foreign_name = raw
                .foreign_table
                .as_deref()
                .ok_or_else(|| DiffError::MissingReference {
                    constraint: raw.name.clone(),
                })?;
            let foreign = resolve_table(schema, &raw.name, foreign_name)?;
            let foreign_keys = resolve_keys(foreign, &raw.name, &raw.foreign_keys)?;
            Constraint::foreign_key(&raw.name, &raw.table, &keys, foreign_name, &foreign_keys)
        }
    })
}

fn referencing_sequence(schema: &Schema, name: &str) -> Option<Sequence> {
    schema.tables.iter().find_map(|table| {
        table
            .columns
            .iter()
            .find(|c| c.default.sequence_name() == Some(name))
            .map(|c| Sequence::new(name, &table.name, &c.name))
    })
}
