//! Sequences backing column defaults.

/// A named sequence referenced by a column default.
///
/// Only sequences some column draws its default from are part of a
/// snapshot; unreferenced sequences are not migration-relevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Sequence name.
    pub name: String,
    /// Table of the column whose default calls this sequence.
    pub table: String,
    /// Column whose default calls this sequence.
    pub column: String,
}

impl Sequence {
    /// Creates a sequence owned by `table.column`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            column: column.into(),
        }
    }
}
