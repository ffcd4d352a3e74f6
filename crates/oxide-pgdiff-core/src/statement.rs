//! Data-definition statements produced by the diff engine.
//!
//! Every identifier is rendered double-quoted. Each statement renders on its
//! own and ends with `;`; warnings render as SQL comments so the stream can be
//! reviewed and executed as-is.

use std::fmt;

use serde::Serialize;

/// Quotes an identifier, doubling embedded double quotes.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes a string literal, doubling embedded single quotes.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// A single statement of the generated migration script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// `CREATE SEQUENCE`.
    CreateSequence {
        /// Sequence name.
        name: String,
    },
    /// `DROP SEQUENCE IF EXISTS`.
    DropSequence {
        /// Sequence name.
        name: String,
    },
    /// `ALTER SEQUENCE ... RENAME TO`.
    RenameSequence {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// `CREATE TYPE ... AS ENUM`.
    CreateEnum {
        /// Type name.
        name: String,
        /// Labels in order.
        labels: Vec<String>,
    },
    /// `DROP TYPE`.
    DropType {
        /// Type name.
        name: String,
    },
    /// `CREATE TABLE` with pre-rendered column and constraint definitions.
    CreateTable {
        /// Table name.
        name: String,
        /// Column declarations followed by table constraints.
        definitions: Vec<String>,
    },
    /// `CREATE OR REPLACE VIEW`.
    CreateView {
        /// View name.
        name: String,
        /// View body.
        definition: String,
    },
    /// `DROP TABLE IF EXISTS`.
    DropTable {
        /// Table name.
        name: String,
    },
    /// `DROP VIEW IF EXISTS ... CASCADE`.
    DropView {
        /// View name.
        name: String,
    },
    /// `ALTER TABLE ... ADD COLUMN`.
    AddColumn {
        /// Table name.
        table: String,
        /// Full column declaration.
        definition: String,
    },
    /// `ALTER TABLE ... DROP COLUMN IF EXISTS`.
    DropColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },
    /// `ALTER COLUMN ... SET NOT NULL`.
    SetNotNull {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },
    /// `ALTER COLUMN ... DROP NOT NULL`.
    DropNotNull {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },
    /// `ALTER COLUMN ... TYPE ... USING`.
    AlterType {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Rendered target type.
        data_type: String,
        /// Raw type name used in the cast.
        cast: String,
    },
    /// `ALTER COLUMN ... SET DEFAULT`.
    SetDefault {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// Rendered default expression.
        expression: String,
    },
    /// `ALTER COLUMN ... DROP DEFAULT`.
    DropDefault {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },
    /// `ALTER TABLE ... ADD CONSTRAINT`.
    AddConstraint {
        /// Table name.
        table: String,
        /// Constraint name.
        name: String,
        /// Rendered constraint clause.
        clause: String,
    },
    /// `ALTER TABLE ... DROP CONSTRAINT IF EXISTS`.
    DropConstraint {
        /// Table name.
        table: String,
        /// Constraint name.
        name: String,
    },
    /// A human-readable warning in place of a statement that could not be
    /// synthesized.
    Warning {
        /// Warning text.
        message: String,
    },
}

impl Statement {
    /// Creates a warning comment.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    /// Returns a stable, machine-readable name for this statement kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CreateSequence { .. } => "create_sequence",
            Self::DropSequence { .. } => "drop_sequence",
            Self::RenameSequence { .. } => "rename_sequence",
            Self::CreateEnum { .. } => "create_enum",
            Self::DropType { .. } => "drop_type",
            Self::CreateTable { .. } => "create_table",
            Self::CreateView { .. } => "create_view",
            Self::DropTable { .. } => "drop_table",
            Self::DropView { .. } => "drop_view",
            Self::AddColumn { .. } => "add_column",
            Self::DropColumn { .. } => "drop_column",
            Self::SetNotNull { .. } => "set_not_null",
            Self::DropNotNull { .. } => "drop_not_null",
            Self::AlterType { .. } => "alter_type",
            Self::SetDefault { .. } => "set_default",
            Self::DropDefault { .. } => "drop_default",
            Self::AddConstraint { .. } => "add_constraint",
            Self::DropConstraint { .. } => "drop_constraint",
            Self::Warning { .. } => "warning",
        }
    }

    /// Returns `true` for warning comments.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }

    /// Renders the statement, terminated by `;` (warnings excepted).
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::CreateSequence { name } => {
                format!("CREATE SEQUENCE {};", quote_identifier(name))
            }
            Self::DropSequence { name } => {
                format!("DROP SEQUENCE IF EXISTS {};", quote_identifier(name))
            }
            Self::RenameSequence { from, to } => format!(
                "ALTER SEQUENCE {} RENAME TO {};",
                quote_identifier(from),
                quote_identifier(to)
            ),
            Self::CreateEnum { name, labels } => {
                let labels: Vec<String> = labels.iter().map(|l| quote_literal(l)).collect();
                format!(
                    "CREATE TYPE {} AS ENUM ({});",
                    quote_identifier(name),
                    labels.join(", ")
                )
            }
            Self::DropType { name } => format!("DROP TYPE {};", quote_identifier(name)),
            Self::CreateTable { name, definitions } => format!(
                "CREATE TABLE {} (\n  {}\n);",
                quote_identifier(name),
                definitions.join(",\n  ")
            ),
            Self::CreateView { name, definition } => format!(
                "CREATE OR REPLACE VIEW {} AS {};",
                quote_identifier(name),
                definition
            ),
            Self::DropTable { name } => format!("DROP TABLE IF EXISTS {};", quote_identifier(name)),
            Self::DropView { name } => {
                format!("DROP VIEW IF EXISTS {} CASCADE;", quote_identifier(name))
            }
            Self::AddColumn { table, definition } => format!(
                "ALTER TABLE {} ADD COLUMN {};",
                quote_identifier(table),
                definition
            ),
            Self::DropColumn { table, column } => format!(
                "ALTER TABLE {} DROP COLUMN IF EXISTS {};",
                quote_identifier(table),
                quote_identifier(column)
            ),
            Self::SetNotNull { table, column } => format!(
                "ALTER TABLE {} ALTER COLUMN {} SET NOT NULL;",
                quote_identifier(table),
                quote_identifier(column)
            ),
            Self::DropNotNull { table, column } => format!(
                "ALTER TABLE {} ALTER COLUMN {} DROP NOT NULL;",
                quote_identifier(table),
                quote_identifier(column)
            ),
            Self::AlterType {
                table,
                column,
                data_type,
                cast,
            } => format!(
                "ALTER TABLE {} ALTER COLUMN {} TYPE {} USING {}::{};",
                quote_identifier(table),
                quote_identifier(column),
                data_type,
                quote_identifier(column),
                cast
            ),
            Self::SetDefault {
                table,
                column,
                expression,
            } => format!(
                "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT {};",
                quote_identifier(table),
                quote_identifier(column),
                expression
            ),
            Self::DropDefault { table, column } => format!(
                "ALTER TABLE {} ALTER COLUMN {} DROP DEFAULT;",
                quote_identifier(table),
                quote_identifier(column)
            ),
            Self::AddConstraint {
                table,
                name,
                clause,
            } => format!(
                "ALTER TABLE {} ADD CONSTRAINT {} {};",
                quote_identifier(table),
                quote_identifier(name),
                clause
            ),
            Self::DropConstraint { table, name } => format!(
                "ALTER TABLE {} DROP CONSTRAINT IF EXISTS {};",
                quote_identifier(table),
                quote_identifier(name)
            ),
            Self::Warning { message } => format!("-- WARNING: {message}"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
