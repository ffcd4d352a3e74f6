//! Table constraints, their equality rules and their DDL clauses.

use std::fmt;

use crate::statement::quote_identifier;

use super::Column;

/// The kind of a table constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// UNIQUE constraint.
    Unique,
    /// PRIMARY KEY constraint.
    PrimaryKey,
    /// FOREIGN KEY constraint.
    ForeignKey,
    /// CHECK constraint.
    Check,
}

impl ConstraintKind {
    /// Maps a `pg_constraint.contype` code. Other codes (exclusion,
    /// constraint triggers) are not modelled.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "u" => Some(Self::Unique),
            "p" => Some(Self::PrimaryKey),
            "f" => Some(Self::ForeignKey),
            "c" => Some(Self::Check),
            _ => None,
        }
    }

    /// Returns the SQL keyword for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "UNIQUE",
            Self::PrimaryKey => "PRIMARY KEY",
            Self::ForeignKey => "FOREIGN KEY",
            Self::Check => "CHECK",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved reference to a column taking part in a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyColumn {
    /// Column name.
    pub name: String,
    /// Column base type.
    pub data_type: String,
    /// Owning table name.
    pub table: String,
}

impl From<&Column> for KeyColumn {
    fn from(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            data_type: column.data_type.clone(),
            table: column.table.clone(),
        }
    }
}

/// A constraint owned by a base table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Constraint name.
    pub name: String,
    /// Constraint kind.
    pub kind: ConstraintKind,
    /// Owning table name.
    pub table: String,
    /// Referenced table, set for foreign keys only.
    pub foreign_table: Option<String>,
    /// Local key columns, in key order.
    pub keys: Vec<KeyColumn>,
    /// Referenced key columns, set for foreign keys only.
    pub foreign_keys: Vec<KeyColumn>,
}

impl Constraint {
    fn local(
        name: impl Into<String>,
        kind: ConstraintKind,
        table: impl Into<String>,
        keys: &[&Column],
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            table: table.into(),
            foreign_table: None,
            keys: keys.iter().map(|c| KeyColumn::from(*c)).collect(),
            foreign_keys: Vec::new(),
        }
    }

    /// Creates a PRIMARY KEY constraint.
    #[must_use]
    pub fn primary_key(name: impl Into<String>, table: impl Into<String>, keys: &[&Column]) -> Self {
        Self::local(name, ConstraintKind::PrimaryKey, table, keys)
    }

    /// Creates a UNIQUE constraint.
    #[must_use]
    pub fn unique(name: impl Into<String>, table: impl Into<String>, keys: &[&Column]) -> Self {
        Self::local(name, ConstraintKind::Unique, table, keys)
    }

    /// Creates a CHECK constraint.
    #[must_use]
    pub fn check(name: impl Into<String>, table: impl Into<String>, keys: &[&Column]) -> Self {
        Self::local(name, ConstraintKind::Check, table, keys)
    }

    /// Creates a FOREIGN KEY constraint.
    #[must_use]
    pub fn foreign_key(
        name: impl Into<String>,
        table: impl Into<String>,
        keys: &[&Column],
        foreign_table: impl Into<String>,
        foreign_keys: &[&Column],
    ) -> Self {
        let mut constraint = Self::local(name, ConstraintKind::ForeignKey, table, keys);
        constraint.foreign_table = Some(foreign_table.into());
        constraint.foreign_keys = foreign_keys.iter().map(|c| KeyColumn::from(*c)).collect();
        constraint
    }

    /// Decides whether two constraints are semantically the same.
    ///
    /// Kinds must match. Foreign keys compare their referenced key sets and
    /// primary keys their local key sets, by column name, type and owning
    /// table, ignoring order. Unique and check constraints are considered
    /// equal once kinds match; this hides changed UNIQUE/CHECK definitions
    /// unless `strict_unique` is set, which compares unique key sets too.
    #[must_use]
    pub fn equivalent(&self, other: &Self, strict_unique: bool) -> bool {
        if self.kind != other.kind {
            return false;
        }
        match self.kind {
            ConstraintKind::ForeignKey => same_keys(&self.foreign_keys, &other.foreign_keys),
            ConstraintKind::PrimaryKey => same_keys(&self.keys, &other.keys),
            ConstraintKind::Unique if strict_unique => same_keys(&self.keys, &other.keys),
            ConstraintKind::Unique | ConstraintKind::Check => true,
        }
    }

    /// Renders the constraint body used by `ADD CONSTRAINT` and `CREATE TABLE`.
    ///
    /// Check constraints and foreign keys without a referenced table render
    /// as an empty string.
    #[must_use]
    pub fn clause(&self) -> String {
        match self.kind {
            ConstraintKind::PrimaryKey => format!("PRIMARY KEY ({})", key_list(&self.keys)),
            ConstraintKind::Unique => format!("UNIQUE ({})", key_list(&self.keys)),
            ConstraintKind::ForeignKey => match &self.foreign_table {
                Some(table) => format!(
                    "FOREIGN KEY ({}) REFERENCES {} ({})",
                    key_list(&self.keys),
                    quote_identifier(table),
                    key_list(&self.foreign_keys)
                ),
                None => String::new(),
            },
            ConstraintKind::Check => String::new(),
        }
    }

    /// Returns `true` if the given column is one of the local keys.
    #[must_use]
    pub fn involves(&self, column: &str) -> bool {
        self.keys.iter().any(|k| k.name == column)
    }
}

/// Returns `true` if every key of `first` appears in `second`.
fn keys_covered(first: &[KeyColumn], second: &[KeyColumn]) -> bool {
    first.iter().all(|key| second.contains(key))
}

fn same_keys(a: &[KeyColumn], b: &[KeyColumn]) -> bool {
    keys_covered(a, b) && keys_covered(b, a)
}

fn key_list(keys: &[KeyColumn]) -> String {
    keys.iter()
        .map(|k| quote_identifier(&k.name))
        .collect::<Vec<_>>()
        .join(", ")
}
