//! # oxide-pgdiff-core
//!
//! Schema snapshot model and structural diff engine for PostgreSQL.
//!
//! This crate provides:
//! - An in-memory model of one schema's tables, columns, constraints,
//!   sequences and enumerated types
//! - A builder turning raw catalog rows into that model
//! - A diff engine that compares a desired and a current snapshot and
//!   synthesizes the DDL statements migrating the latter to the former
//!
//! The crate performs no I/O. Driver crates implement [`Introspect`] to
//! read catalog rows from a live database.
//!
//! ## Example
//!
//! ```rust
//! use oxide_pgdiff_core::prelude::*;
//!
//! let desired = Schema::new("staging", "public").table(
//!     Table::new("users")
//!         .column(Column::new("id", "int4").not_null())
//!         .column(Column::new("email", "text")),
//! );
//! let current = Schema::new("production", "public")
//!     .table(Table::new("users").column(Column::new("id", "int4").not_null()));
//!
//! let diff = SchemaDiffer::new().diff(&desired, &current).unwrap();
//! assert_eq!(diff.to_sql(), "ALTER TABLE \"users\" ADD COLUMN \"email\" text;\n");
//! ```

pub mod array;
pub mod catalog;
pub mod diff;
pub mod error;
pub mod model;
pub mod statement;

pub use catalog::{load_schema, CatalogRows, Introspect, RawColumn, RawConstraint, RawTable, RawType};
pub use diff::{DiffOptions, SchemaDiff, SchemaDiffer};
pub use error::{DiffError, Result};
pub use model::{
    Column, Constraint, ConstraintKind, DefaultValue, KeyColumn, Schema, Sequence, Table,
    TableKind, UserType,
};
pub use statement::Statement;

/// Commonly used types, for glob import.
pub mod prelude {
    pub use crate::catalog::{CatalogRows, Introspect};
    pub use crate::diff::{DiffOptions, SchemaDiff, SchemaDiffer};
    pub use crate::error::{DiffError, Result};
    pub use crate::model::{
        Column, Constraint, ConstraintKind, DefaultValue, Schema, Table, TableKind, UserType,
    };
    pub use crate::statement::Statement;
}
