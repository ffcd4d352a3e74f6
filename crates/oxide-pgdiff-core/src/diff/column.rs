//! Column-level diff: nullability, type and default reconciliation.

use tracing::debug;

use super::DiffOptions;
use crate::model::{Column, DefaultValue};
use crate::statement::Statement;

/// Computes the statements turning `current` into `desired`, two same-named
/// columns of `table`.
///
/// Nullability, type and default are checked independently, in that order.
#[must_use]
pub fn diff_column(
    table: &str,
    desired: &Column,
    current: &Column,
    options: &DiffOptions,
) -> Vec<Statement> {
    let mut statements = Vec::new();
    let target = || (table.to_string(), desired.name.clone());

    match (desired.nullable, current.nullable) {
        (false, true) => {
            let (table, column) = target();
            statements.push(Statement::SetNotNull { table, column });
        }
        (true, false) => {
            let (table, column) = target();
            statements.push(Statement::DropNotNull { table, column });
        }
        _ => {}
    }

    if type_changed(desired, current, options.numeric_precision) {
        let (table, column) = target();
        statements.push(Statement::AlterType {
            table,
            column,
            data_type: desired.render_type(options.numeric_precision),
            cast: desired.data_type.clone(),
        });
    }

    reconcile_default(table, desired, current, options, &mut statements);

    if !statements.is_empty() {
        debug!(table, column = %desired.name, changes = statements.len(), "Column differs");
    }
    statements
}

/// Base type or declared length differ. Numeric precision and scale only
/// count when `precise` is set.
fn type_changed(desired: &Column, current: &Column, precise: bool) -> bool {
    if desired.data_type != current.data_type || desired.length != current.length {
        return true;
    }
    precise
        && desired.is_numeric()
        && (desired.numeric_precision, desired.numeric_scale)
            != (current.numeric_precision, current.numeric_scale)
}

fn reconcile_default(
    table: &str,
    desired: &Column,
    current: &Column,
    options: &DiffOptions,
    statements: &mut Vec<Statement>,
) {
    let column = || desired.name.clone();
    match (&current.default, &desired.default) {
        (DefaultValue::None, wanted) => {
            if let Some(expression) = wanted.render() {
                statements.push(Statement::SetDefault {
                    table: table.to_string(),
                    column: column(),
                    expression,
                });
            }
        }
        (DefaultValue::Sequence(existing), DefaultValue::None) => {
            statements.push(Statement::DropSequence {
                name: existing.clone(),
            });
        }
        (DefaultValue::Sequence(existing), DefaultValue::Sequence(wanted)) => {
            if existing != wanted {
                // The desired name was created up front; make room for the rename.
                statements.push(Statement::DropSequence {
                    name: wanted.clone(),
                });
                statements.push(Statement::RenameSequence {
                    from: existing.clone(),
                    to: wanted.clone(),
                });
            }
        }
        (DefaultValue::Sequence(_), DefaultValue::Literal(_)) => {}
        (DefaultValue::Literal(existing), wanted) => {
            if matches!(wanted, DefaultValue::Literal(text) if text == existing) {
                return;
            }
            statements.push(Statement::DropDefault {
                table: table.to_string(),
                column: column(),
            });
            if let (true, DefaultValue::Literal(text)) = (options.restore_literal_defaults, wanted) {
                statements.push(Statement::SetDefault {
                    table: table.to_string(),
                    column: column(),
                    expression: text.clone(),
                });
            }
        }
    }
}
