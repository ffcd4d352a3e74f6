//! Schema-level orchestration of the statement stream.

use tracing::{debug, warn};

use super::set::{difference_by_name, intersection_by_name};
use super::table::{create_table, diff_table, drop_table};
use super::DiffOptions;
use crate::error::Result;
use crate::model::{Schema, Table};
use crate::statement::Statement;

/// Produces the statements turning `current` into `desired`.
///
/// Order: sequences, enum types, changes to common tables, table drops,
/// type drops, table creation, then foreign keys of the created tables.
pub(super) fn diff_schema(
    desired: &Schema,
    current: &Schema,
    options: &DiffOptions,
) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();

    for sequence in difference_by_name(&desired.sequences, &current.sequences) {
        statements.push(Statement::CreateSequence {
            name: sequence.name.clone(),
        });
    }

    for user_type in difference_by_name(&desired.types, &current.types) {
        if user_type.is_enum {
            statements.push(Statement::CreateEnum {
                name: user_type.name.clone(),
                labels: user_type.labels.clone(),
            });
        } else {
            warn!(name = %user_type.name, "Cannot create non-enum type");
            statements.push(Statement::warning(format!(
                "no idea how to create this type -> {}",
                user_type.name
            )));
        }
    }

    for (wanted, existing) in intersection_by_name(&desired.tables, &current.tables) {
        statements.extend(diff_table(wanted, existing, options)?);
    }

    for table in replaced(&current.tables, desired) {
        debug!(table = %table.name, "Dropping");
        statements.push(drop_table(table));
    }

    for user_type in difference_by_name(&current.types, &desired.types) {
        statements.push(Statement::DropType {
            name: user_type.name.clone(),
        });
    }

    let mut deferred = Vec::new();
    for table in replaced(&desired.tables, current) {
        debug!(table = %table.name, "Creating");
        let (created, foreign_keys) = create_table(table, options);
        statements.extend(created);
        deferred.extend(foreign_keys);
    }
    statements.extend(deferred);

    Ok(statements)
}

/// Tables of `tables` missing from `other`, or present there only as a
/// view. Views are always recreated rather than altered.
fn replaced<'a>(tables: &'a [Table], other: &Schema) -> Vec<&'a Table> {
    tables
        .iter()
        .filter(|t| other.table_named(&t.name).map_or(true, Table::is_view))
        .collect()
}
