//! Columns and their default values.

use std::sync::LazyLock;

use regex::Regex;

use crate::statement::quote_identifier;

/// Matches a sequence-backed default such as `nextval('"orders_id_seq"'::regclass)`.
static SEQUENCE_DEFAULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"nextval\('"?([^"']+)"?'::regclass\)"#).expect("sequence default pattern")
});

/// The default value of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DefaultValue {
    /// No default.
    #[default]
    None,
    /// A literal SQL expression, kept verbatim.
    Literal(String),
    /// The next value of the named sequence.
    Sequence(String),
}

impl DefaultValue {
    /// Classifies a catalog default expression.
    ///
    /// Text matching the sequence pattern exactly once becomes a sequence
    /// reference; any other text is a literal; `None` stays absent.
    #[must_use]
    pub fn classify(expression: Option<&str>) -> Self {
        let Some(text) = expression else {
            return Self::None;
        };
        let mut matches = SEQUENCE_DEFAULT.captures_iter(text);
        match (matches.next(), matches.next()) {
            (Some(captures), None) => Self::Sequence(captures[1].to_string()),
            _ => Self::Literal(text.to_string()),
        }
    }

    /// Renders the default as a SQL expression, or `None` when absent.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Literal(text) => Some(text.clone()),
            Self::Sequence(name) => Some(format!("NEXTVAL('\"{name}\"')")),
        }
    }

    /// Returns the sequence name if this default is sequence-backed.
    #[must_use]
    pub fn sequence_name(&self) -> Option<&str> {
        match self {
            Self::Sequence(name) => Some(name),
            _ => None,
        }
    }

    /// Returns `true` if there is no default.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A column of a table or view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// 1-based ordinal position in the catalog. Only used to resolve
    /// constraint keys, never to reorder columns.
    pub position: i32,
    /// Default value.
    pub default: DefaultValue,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Base type name, already quoted by the catalog where needed.
    pub data_type: String,
    /// Maximum character length, if declared.
    pub length: Option<i32>,
    /// Numeric precision, if any.
    pub numeric_precision: Option<i32>,
    /// Numeric scale, if any.
    pub numeric_scale: Option<i32>,
    /// Name of the owning table.
    pub table: String,
    /// Names of the constraints this column participates in.
    pub constraints: Vec<String>,
}

impl Column {
    /// Creates a nullable column without a default.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: 0,
            default: DefaultValue::None,
            nullable: true,
            data_type: data_type.into(),
            length: None,
            numeric_precision: None,
            numeric_scale: None,
            table: String::new(),
            constraints: Vec::new(),
        }
    }

    /// Sets the ordinal position.
    #[must_use]
    pub const fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the maximum character length.
    #[must_use]
    pub const fn length(mut self, length: i32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets numeric precision and scale.
    #[must_use]
    pub const fn numeric(mut self, precision: i32, scale: Option<i32>) -> Self {
        self.numeric_precision = Some(precision);
        self.numeric_scale = scale;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    /// Returns `true` if the base type is the arbitrary-precision numeric type.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self.data_type.as_str(), "numeric" | "decimal")
    }

    /// Renders the type as `<data_type>` followed by `(<length>)` when a
    /// maximum length is known. Precision and scale are not rendered.
    #[must_use]
    pub fn type_string(&self) -> String {
        match self.length {
            Some(length) => format!("{}({length})", self.data_type),
            None => self.data_type.clone(),
        }
    }

    /// Like [`type_string`](Self::type_string), but renders numeric
    /// precision and scale when `precise` is set.
    #[must_use]
    pub fn render_type(&self, precise: bool) -> String {
        if !precise || !self.is_numeric() {
            return self.type_string();
        }
        match (self.numeric_precision, self.numeric_scale) {
            (Some(p), Some(s)) => format!("{}({p},{s})", self.data_type),
            (Some(p), None) => format!("{}({p})", self.data_type),
            _ => self.type_string(),
        }
    }

    /// Renders the full declaration: `"<name>" <type> [DEFAULT <expr>] [NOT NULL]`,
    /// with numeric precision and scale when `precise` is set.
    #[must_use]
    pub fn declaration(&self, precise: bool) -> String {
        let mut sql = format!("{} {}", quote_identifier(&self.name), self.render_type(precise));
        if let Some(default) = self.default.render() {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default);
        }
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        sql
    }
}
