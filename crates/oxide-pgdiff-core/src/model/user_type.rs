//! User-defined types.

/// A user-defined type. Only enumerated types can be recreated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserType {
    /// Type name.
    pub name: String,
    /// Whether this is an enumerated type.
    pub is_enum: bool,
    /// Enum labels in sort order. Empty for other types.
    pub labels: Vec<String>,
}

impl UserType {
    /// Creates an enumerated type.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            is_enum: true,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a non-enum type (composite, domain, range, ...).
    #[must_use]
    pub fn other(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_enum: false,
            labels: Vec::new(),
        }
    }
}
