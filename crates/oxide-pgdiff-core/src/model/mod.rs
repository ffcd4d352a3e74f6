//! In-memory snapshot of one schema's structure.
//!
//! A [`Schema`] owns its tables, sequences and types; a [`Table`] owns its
//! columns and constraints. Back-references (column to table, column to
//! constraints, constraint to referenced table) are stored as names and
//! resolved through the owning [`Schema`], so the graph has no cycles.
//! Snapshots are built once and only read afterwards.

mod column;
mod constraint;
mod sequence;
mod table;
mod user_type;

pub use column::{Column, DefaultValue};
pub use constraint::{Constraint, ConstraintKind, KeyColumn};
pub use sequence::Sequence;
pub use table::{Table, TableKind};
pub use user_type::UserType;

/// A snapshot of one catalog/schema pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Catalog (database) name.
    pub catalog: String,
    /// Schema name, e.g. `public`.
    pub name: String,
    /// Tables and views, in catalog order.
    pub tables: Vec<Table>,
    /// Sequences referenced by column defaults.
    pub sequences: Vec<Sequence>,
    /// User-defined types.
    pub types: Vec<UserType>,
}

impl Schema {
    /// Creates an empty schema snapshot.
    #[must_use]
    pub fn new(catalog: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            catalog: catalog.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a table. Sequence-backed defaults of its columns register
    /// their sequences with the schema.
    #[must_use]
    pub fn table(mut self, mut table: Table) -> Self {
        table.schema.clone_from(&self.name);
        table.catalog.clone_from(&self.catalog);
        for column in &table.columns {
            if let Some(name) = column.default.sequence_name() {
                if self.sequence_named(name).is_none() {
                    self.sequences
                        .push(Sequence::new(name, &table.name, &column.name));
                }
            }
        }
        self.tables.push(table);
        self
    }

    /// Adds a user-defined type.
    #[must_use]
    pub fn user_type(mut self, user_type: UserType) -> Self {
        self.types.push(user_type);
        self
    }

    /// Looks up a table by name. The first match wins.
    #[must_use]
    pub fn table_named(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn type_named(&self, name: &str) -> Option<&UserType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Looks up a sequence by name.
    #[must_use]
    pub fn sequence_named(&self, name: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.name == name)
    }

    /// Returns table names in catalog order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }
}
