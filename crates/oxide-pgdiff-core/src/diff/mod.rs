//! Structural diff between two schema snapshots.
//!
//! [`SchemaDiffer`] compares a desired and a current [`Schema`] and returns
//! the ordered DDL statements that migrate the current one to the desired
//! one. Nothing is executed.

mod column;
mod schema;
mod set;
mod table;

use serde::Serialize;
use tracing::info;

pub use column::diff_column;
pub use set::{difference, difference_by_name, intersection_by_name, Named};
pub use table::{create_table, diff_table, drop_table};

use crate::error::Result;
use crate::model::Schema;
use crate::statement::Statement;

/// Options for the differ. Everything is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Compare the key columns of UNIQUE constraints instead of treating
    /// any two of them as equal.
    pub strict_unique: bool,
    /// Compare and render numeric precision and scale.
    pub numeric_precision: bool,
    /// Set the desired literal default after dropping a changed one.
    pub restore_literal_defaults: bool,
}

impl DiffOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables key comparison for UNIQUE constraints.
    #[must_use]
    pub const fn with_strict_unique(mut self) -> Self {
        self.strict_unique = true;
        self
    }

    /// Enables numeric precision and scale handling.
    #[must_use]
    pub const fn with_numeric_precision(mut self) -> Self {
        self.numeric_precision = true;
        self
    }

    /// Enables restoring changed literal defaults.
    #[must_use]
    pub const fn with_restore_literal_defaults(mut self) -> Self {
        self.restore_literal_defaults = true;
        self
    }
}

/// The ordered statements of one diff run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDiff {
    statements: Vec<Statement>,
}

impl SchemaDiff {
    /// Wraps an ordered statement list.
    #[must_use]
    pub const fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Returns `true` when both schemas already match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Number of statements, warnings included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Number of warning comments.
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.statements.iter().filter(|s| s.is_warning()).count()
    }

    /// Iterates over the statements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Returns the statements.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Consumes the diff, returning its statements.
    #[must_use]
    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    /// Renders the stream, one statement per line.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        for statement in &self.statements {
            sql.push_str(&statement.to_sql());
            sql.push('\n');
        }
        sql
    }
}

impl<'a> IntoIterator for &'a SchemaDiff {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compares schema snapshots.
#[derive(Debug, Default)]
pub struct SchemaDiffer {
    options: DiffOptions,
}

impl SchemaDiffer {
    /// Creates a differ with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a differ with custom options.
    #[must_use]
    pub const fn with_options(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Returns the active options.
    #[must_use]
    pub const fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Computes the statements that migrate `current` to `desired`.
    ///
    /// # Errors
    ///
    /// Fails if a table is a view on one side and a base table on the
    /// other. No partial output is returned.
    pub fn diff(&self, desired: &Schema, current: &Schema) -> Result<SchemaDiff> {
        info!(
            desired = %desired.catalog,
            current = %current.catalog,
            schema = %desired.name,
            "Comparing schemas"
        );
        let statements = schema::diff_schema(desired, current, &self.options)?;
        let diff = SchemaDiff::new(statements);
        info!(statements = diff.len(), warnings = diff.warnings(), "Diff complete");
        Ok(diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Table};

    #[test]
    fn options_builder() {
        let options = DiffOptions::new()
            .with_strict_unique()
            .with_numeric_precision()
            .with_restore_literal_defaults();
        assert!(options.strict_unique);
        assert!(options.numeric_precision);
        assert!(options.restore_literal_defaults);
        assert_eq!(DiffOptions::new(), DiffOptions::default());
        assert!(!DiffOptions::new().strict_unique);
    }

    #[test]
    fn renders_stream_line_by_line() {
        let diff = SchemaDiff::new(vec![
            Statement::DropTable {
                name: "legacy".into(),
            },
            Statement::warning("check me"),
        ]);
        assert_eq!(diff.to_sql(), "DROP TABLE IF EXISTS \"legacy\";\n-- WARNING: check me\n");
        assert_eq!(diff.len(), 2);
        assert_eq!(diff.warnings(), 1);
        assert_eq!((&diff).into_iter().count(), 2);
    }

    #[test]
    fn strict_unique_changes_outcome() {
        let desired = Table::new("t")
            .column(Column::new("a", "text"))
            .column(Column::new("b", "text"));
        let uq = crate::model::Constraint::unique("t_key", "t", &[&desired.columns[0]]);
        let desired = desired.constraint(uq);
        let current = Table::new("t")
            .column(Column::new("a", "text"))
            .column(Column::new("b", "text"));
        let uq = crate::model::Constraint::unique("t_key", "t", &[&current.columns[1]]);
        let current = current.constraint(uq);

        let desired = Schema::new("d", "public").table(desired);
        let current = Schema::new("c", "public").table(current);

        assert!(SchemaDiffer::new().diff(&desired, &current).unwrap().is_empty());
        let strict = SchemaDiffer::with_options(DiffOptions::new().with_strict_unique());
        assert_eq!(strict.diff(&desired, &current).unwrap().len(), 2);
    }

    #[test]
    fn serializes_statements() {
        let diff = SchemaDiff::new(vec![Statement::CreateSequence { name: "s".into() }]);
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["statements"][0]["kind"], "create_sequence");
    }
}
