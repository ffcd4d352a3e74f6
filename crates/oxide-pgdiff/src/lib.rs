//! Generate migration scripts by diffing two PostgreSQL schemas.
//!
//! `oxide-pgdiff` reads the catalogs of a desired and a current database,
//! builds a snapshot of each with [`oxide_pgdiff_core`], and writes the DDL
//! that migrates the current database to the desired structure. The script
//! is wrapped in a transaction that rolls back by default so it can be
//! reviewed before it is applied.
//!
//! # Example
//!
//! ```rust,ignore
//! use oxide_pgdiff::prelude::*;
//!
//! let config = ConnectionConfig::new().user("deploy");
//! let desired = read_schema(&config, "staging", "public").await?;
//! let current = read_schema(&config, "production", "public").await?;
//! let diff = SchemaDiffer::new().diff(&desired, &current)?;
//! let script = MigrationScript::new("staging", "production", "public", diff);
//! write_output("migrate.sql".as_ref(), &script.to_sql(Terminator::Rollback)).await?;
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod reader;

pub use config::ConnectionConfig;
pub use error::{PgDiffError, Result};
pub use output::{write_output, MigrationScript, OutputFormat, Terminator};
pub use reader::{read_schema, PgCatalogReader};

/// Re-exports of commonly used types.
pub mod prelude {
    pub use crate::config::ConnectionConfig;
    pub use crate::error::{PgDiffError, Result};
    pub use crate::output::{write_output, MigrationScript, OutputFormat, Terminator};
    pub use crate::reader::{read_schema, PgCatalogReader};
    pub use oxide_pgdiff_core::{DiffOptions, Schema, SchemaDiff, SchemaDiffer, Statement};
}
