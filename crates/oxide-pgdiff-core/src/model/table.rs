//! Tables and views.

use std::fmt;

use super::{Column, Constraint, ConstraintKind};

/// Whether a relation is a base table or a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// A table holding its own rows.
    BaseTable,
    /// A view.
    View,
}

impl TableKind {
    /// Maps an `information_schema.tables.table_type` value.
    #[must_use]
    pub fn from_catalog(value: &str) -> Option<Self> {
        match value {
            "BASE TABLE" => Some(Self::BaseTable),
            "VIEW" => Some(Self::View),
            _ => None,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseTable => f.write_str("base table"),
            Self::View => f.write_str("view"),
        }
    }
}

/// A table or view of a schema snapshot.
///
/// Tables from two snapshots are matched by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Base table or view.
    pub kind: TableKind,
    /// Owning schema name.
    pub schema: String,
    /// Owning catalog name.
    pub catalog: String,
    /// Columns in ordinal order.
    pub columns: Vec<Column>,
    /// Constraints. Always empty for views.
    pub constraints: Vec<Constraint>,
    /// View body, for views only.
    pub view_definition: Option<String>,
}

impl Table {
    /// Creates an empty base table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TableKind::BaseTable,
            schema: String::new(),
            catalog: String::new(),
            columns: Vec::new(),
            constraints: Vec::new(),
            view_definition: None,
        }
    }

    /// Creates a view with the given body.
    #[must_use]
    pub fn view(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            kind: TableKind::View,
            view_definition: Some(definition.into()),
            ..Self::new(name)
        }
    }

    /// Appends a column, taking ownership of it. A column without an
    /// explicit position gets the next ordinal.
    #[must_use]
    pub fn column(mut self, mut column: Column) -> Self {
        column.table.clone_from(&self.name);
        if column.position == 0 {
            column.position = i32::try_from(self.columns.len() + 1).unwrap_or(i32::MAX);
        }
        self.columns.push(column);
        self
    }

    /// Adds a constraint and registers it on its key columns.
    /// Ignored for views, which carry no constraints.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.add_constraint(constraint);
        self
    }

    /// In-place form of [`constraint`](Self::constraint).
    pub fn add_constraint(&mut self, constraint: Constraint) {
        if self.is_view() {
            return;
        }
        for column in &mut self.columns {
            if constraint.involves(&column.name) {
                column.constraints.push(constraint.name.clone());
            }
        }
        self.constraints.push(constraint);
    }

    /// Returns `true` for views.
    #[must_use]
    pub fn is_view(&self) -> bool {
        self.kind == TableKind::View
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column_named(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Looks up a column by its 1-based ordinal position.
    #[must_use]
    pub fn column_at(&self, position: i32) -> Option<&Column> {
        self.columns.iter().find(|c| c.position == position)
    }

    /// Returns the primary key constraint, if any.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|c| c.kind == ConstraintKind::PrimaryKey)
    }
}
