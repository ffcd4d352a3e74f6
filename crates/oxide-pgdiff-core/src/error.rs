//! Error types for snapshot building and diffing.

use crate::array::ArrayParseError;
use crate::model::TableKind;

/// Errors that can occur while building a snapshot or diffing two of them.
///
/// Every variant describes a structural inconsistency in the catalog data.
/// None of them are transient, so callers should abort the run instead of
/// emitting a partial script.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A constraint key refers to an ordinal position missing from its table.
    #[error("Constraint '{constraint}' refers to column #{position} which doesn't exist in table '{table}'")]
    UnresolvedColumn {
        /// The constraint holding the reference.
        constraint: String,
        /// The table that was searched.
        table: String,
        /// The 1-based ordinal position that was not found.
        position: i32,
    },

    /// A constraint refers to a table missing from the snapshot.
    #[error("Constraint '{constraint}' refers to table '{table}' which doesn't exist")]
    UnresolvedTable {
        /// The constraint holding the reference.
        constraint: String,
        /// The table name that could not be resolved.
        table: String,
    },

    /// A foreign key constraint came without a referenced table.
    #[error("Foreign key '{constraint}' has no referenced table")]
    MissingReference {
        /// The foreign key constraint.
        constraint: String,
    },

    /// A constraint key is not an integer ordinal position.
    #[error("Constraint '{constraint}' has an invalid key position '{value}'")]
    InvalidKeyPosition {
        /// The constraint holding the key.
        constraint: String,
        /// The raw key text.
        value: String,
    },

    /// A table is a base table on one side and a view on the other.
    #[error("Table '{table}' is a {desired} in the desired schema but a {current} in the current schema")]
    KindMismatch {
        /// Table name.
        table: String,
        /// Kind in the desired schema.
        desired: TableKind,
        /// Kind in the current schema.
        current: TableKind,
    },

    /// A catalog array literal could not be decoded.
    #[error(transparent)]
    ArrayLiteral(#[from] ArrayParseError),
}

/// Result type for snapshot and diff operations.
pub type Result<T> = std::result::Result<T, DiffError>;
