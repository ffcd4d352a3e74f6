//! Table-level diff and table synthesis.

use tracing::debug;

use super::column::diff_column;
use super::set::{difference, difference_by_name, intersection_by_name};
use super::DiffOptions;
use crate::error::{DiffError, Result};
use crate::model::{Constraint, ConstraintKind, Table};
use crate::statement::{quote_identifier, Statement};

/// Computes the statements turning `current` into `desired`, two tables
/// of the same name.
///
/// Views are recreated at schema level and yield nothing here. Column
/// order is never changed.
///
/// # Errors
///
/// Returns [`DiffError::KindMismatch`] if one side is a view and the other
/// a base table.
pub fn diff_table(desired: &Table, current: &Table, options: &DiffOptions) -> Result<Vec<Statement>> {
    if desired.kind != current.kind {
        return Err(DiffError::KindMismatch {
            table: desired.name.clone(),
            desired: desired.kind,
            current: current.kind,
        });
    }
    if desired.is_view() {
        return Ok(Vec::new());
    }

    let table = desired.name.as_str();
    let mut statements = Vec::new();

    for column in difference_by_name(&desired.columns, &current.columns) {
        statements.push(Statement::AddColumn {
            table: table.to_string(),
            definition: column.declaration(options.numeric_precision),
        });
    }

    let common = intersection_by_name(&desired.columns, &current.columns);
    for (wanted, existing) in &common {
        statements.extend(diff_column(table, wanted, existing, options));
    }
    if reordered(desired, current) {
        debug!(table, "Column order differs; reordering is not supported, leaving as is");
    }

    let same = |a: &Constraint, b: &Constraint| a.equivalent(b, options.strict_unique);
    for constraint in difference(&desired.constraints, &current.constraints, same) {
        statements.push(add_constraint(table, constraint));
    }
    for constraint in difference(&current.constraints, &desired.constraints, same) {
        statements.push(Statement::DropConstraint {
            table: table.to_string(),
            name: constraint.name.clone(),
        });
    }

    for column in difference_by_name(&current.columns, &desired.columns) {
        statements.push(Statement::DropColumn {
            table: table.to_string(),
            column: column.name.clone(),
        });
    }

    debug!(table, statements = statements.len(), "Compared table");
    Ok(statements)
}

/// Whether the columns both tables share appear in a different relative order.
fn reordered(desired: &Table, current: &Table) -> bool {
    let shared = |of: &Table, other: &Table| -> Vec<String> {
        of.columns
            .iter()
            .filter(|c| other.column_named(&c.name).is_some())
            .map(|c| c.name.clone())
            .collect()
    };
    shared(desired, current) != shared(current, desired)
}

/// `ADD CONSTRAINT`, or a warning when no clause can be rendered.
pub(crate) fn add_constraint(table: &str, constraint: &Constraint) -> Statement {
    let clause = constraint.clause();
    if clause.is_empty() {
        return unsupported_constraint(table, constraint);
    }
    Statement::AddConstraint {
        table: table.to_string(),
        name: constraint.name.clone(),
        clause,
    }
}

fn unsupported_constraint(table: &str, constraint: &Constraint) -> Statement {
    Statement::warning(format!(
        "cannot generate {} constraint {} on {}, add it manually",
        constraint.kind,
        quote_identifier(&constraint.name),
        quote_identifier(table)
    ))
}

/// Synthesizes a new table or view.
///
/// Returns the creating statements, plus the foreign keys to add once
/// every table exists.
#[must_use]
pub fn create_table(table: &Table, options: &DiffOptions) -> (Vec<Statement>, Vec<Statement>) {
    if table.is_view() {
        let statement = match &table.view_definition {
            Some(definition) if !definition.is_empty() => Statement::CreateView {
                name: table.name.clone(),
                definition: definition.clone(),
            },
            _ => Statement::warning(format!(
                "view {} has no definition, recreate it manually",
                quote_identifier(&table.name)
            )),
        };
        return (vec![statement], Vec::new());
    }

    let mut definitions: Vec<String> = table
        .columns
        .iter()
        .map(|c| c.declaration(options.numeric_precision))
        .collect();
    let mut warnings = Vec::new();
    let mut deferred = Vec::new();

    for constraint in &table.constraints {
        if constraint.kind == ConstraintKind::ForeignKey {
            deferred.push(add_constraint(&table.name, constraint));
            continue;
        }
        let clause = constraint.clause();
        if clause.is_empty() {
            warnings.push(unsupported_constraint(&table.name, constraint));
        } else {
            definitions.push(format!(
                "CONSTRAINT {} {clause}",
                quote_identifier(&constraint.name)
            ));
        }
    }

    let mut statements = vec![Statement::CreateTable {
        name: table.name.clone(),
        definitions,
    }];
    statements.extend(warnings);
    (statements, deferred)
}

/// `DROP TABLE` or `DROP VIEW`, depending on the kind.
#[must_use]
pub fn drop_table(table: &Table) -> Statement {
    if table.is_view() {
        Statement::DropView {
            name: table.name.clone(),
        }
    } else {
        Statement::DropTable {
            name: table.name.clone(),
        }
    }
}
