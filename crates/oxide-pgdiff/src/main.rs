//! oxide-pgdiff CLI
//!
//! Compares two PostgreSQL databases and writes the migration script.

use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use oxide_pgdiff::prelude::*;

/// Generate the DDL that migrates CURRENT to the structure of DESIRED.
#[derive(Parser)]
#[command(name = "oxide-pgdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database holding the desired schema.
    desired: String,

    /// Database to migrate.
    current: String,

    /// Server host.
    #[arg(long, env = "PGHOST", default_value = "localhost")]
    host: String,

    /// Server port.
    #[arg(short, long, env = "PGPORT", default_value_t = 5432)]
    port: u16,

    /// Role to connect as.
    #[arg(short, long, env = "PGUSER", default_value = "postgres")]
    user: String,

    /// Password.
    #[arg(long, env = "PGPASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Schema to compare in both databases.
    #[arg(short, long, default_value = "public")]
    schema: String,

    /// Output file, `-` for stdout.
    #[arg(short, long, default_value = "migrate.sql")]
    output: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Sql)]
    format: OutputFormat,

    /// End the script with COMMIT instead of ROLLBACK.
    #[arg(long)]
    commit: bool,

    /// Compare the columns of UNIQUE constraints.
    #[arg(long)]
    strict_unique: bool,

    /// Compare and render numeric precision and scale.
    #[arg(long)]
    numeric_precision: bool,

    /// Set the new literal default after dropping a changed one.
    #[arg(long)]
    restore_literal_defaults: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn connection(&self) -> ConnectionConfig {
        ConnectionConfig::new()
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .password(&self.password)
    }

    fn diff_options(&self) -> DiffOptions {
        let mut options = DiffOptions::new();
        if self.strict_unique {
            options = options.with_strict_unique();
        }
        if self.numeric_precision {
            options = options.with_numeric_precision();
        }
        if self.restore_literal_defaults {
            options = options.with_restore_literal_defaults();
        }
        options
    }

    const fn terminator(&self) -> Terminator {
        if self.commit {
            Terminator::Commit
        } else {
            Terminator::Rollback
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.connection();
    config.validate()?;

    let desired = read_schema(&config, &cli.desired, &cli.schema).await?;
    let current = read_schema(&config, &cli.current, &cli.schema).await?;

    let diff = SchemaDiffer::with_options(cli.diff_options()).diff(&desired, &current)?;
    if diff.is_empty() {
        info!("Schemas already match, nothing to migrate.");
    }
    if diff.warnings() > 0 {
        warn!(count = diff.warnings(), "Some changes need manual attention, see WARNING comments");
    }

    let script = MigrationScript::new(&cli.desired, &cli.current, &cli.schema, diff);
    let contents = script.render(cli.format, cli.terminator())?;
    write_output(&cli.output, &contents).await?;

    Ok(())
}
