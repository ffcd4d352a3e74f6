//! Rendering and writing of the migration script.

use std::path::Path;

use chrono::{DateTime, Utc};
use oxide_pgdiff_core::SchemaDiff;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::error::Result;

/// Output path meaning standard output.
pub const STDOUT: &str = "-";

/// Script format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// A transaction-wrapped SQL script.
    #[default]
    Sql,
    /// A JSON report listing each statement.
    Json,
}

/// How the SQL script's transaction ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Terminator {
    /// `ROLLBACK;`, for review runs.
    #[default]
    Rollback,
    /// `COMMIT;`.
    Commit,
}

impl Terminator {
    /// Returns the closing statement.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Rollback => "ROLLBACK;",
            Self::Commit => "COMMIT;",
        }
    }
}

/// A generated migration between two catalogs.
#[derive(Debug, Clone)]
pub struct MigrationScript {
    /// Desired catalog name.
    pub desired: String,
    /// Current catalog name.
    pub current: String,
    /// Schema name.
    pub schema: String,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
    /// The statements.
    pub diff: SchemaDiff,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    desired: &'a str,
    current: &'a str,
    schema: &'a str,
    generated_at: DateTime<Utc>,
    statements: Vec<JsonStatement>,
}

#[derive(Serialize)]
struct JsonStatement {
    kind: &'static str,
    sql: String,
}

impl MigrationScript {
    /// Creates a script stamped with the current time.
    #[must_use]
    pub fn new(
        desired: impl Into<String>,
        current: impl Into<String>,
        schema: impl Into<String>,
        diff: SchemaDiff,
    ) -> Self {
        Self {
            desired: desired.into(),
            current: current.into(),
            schema: schema.into(),
            generated_at: Utc::now(),
            diff,
        }
    }

    /// Renders the SQL script: header comments, then the statements inside
    /// a transaction closed by `terminator`.
    #[must_use]
    pub fn to_sql(&self, terminator: Terminator) -> String {
        format!(
            "-- Migrate \"{}\" to match \"{}\" (schema \"{}\")\n\
             -- Generated at {}\n\
             SET client_min_messages TO WARNING;\nBEGIN;\n{}{}\n\n",
            self.current,
            self.desired,
            self.schema,
            self.generated_at.to_rfc3339(),
            self.diff.to_sql(),
            terminator.as_sql()
        )
    }

    /// Renders the JSON report.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            desired: &self.desired,
            current: &self.current,
            schema: &self.schema,
            generated_at: self.generated_at,
            statements: self
                .diff
                .iter()
                .map(|s| JsonStatement {
                    kind: s.kind(),
                    sql: s.to_sql(),
                })
                .collect(),
        };
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }

    /// Renders in the requested format.
    ///
    /// # Errors
    ///
    /// Fails if JSON serialization fails.
    pub fn render(&self, format: OutputFormat, terminator: Terminator) -> Result<String> {
        match format {
            OutputFormat::Sql => Ok(self.to_sql(terminator)),
            OutputFormat::Json => self.to_json(),
        }
    }
}

/// Writes `contents` to `path`, or to standard output for [`STDOUT`].
///
/// # Errors
///
/// Fails if the file cannot be written.
pub async fn write_output(path: &Path, contents: &str) -> Result<()> {
    if path.as_os_str() == STDOUT {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(contents.as_bytes()).await?;
        stdout.flush().await?;
    } else {
        tokio::fs::write(path, contents).await?;
        info!(path = %path.display(), bytes = contents.len(), "Wrote migration script");
    }
    Ok(())
}
