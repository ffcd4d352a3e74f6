//! Connection settings for the catalogs being compared.

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::{PgDiffError, Result};

/// Server settings shared by both catalogs. Only the database name differs
/// between the desired and the current side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Role to connect as.
    pub user: String,
    /// Password, empty for none.
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
        }
    }
}

impl ConnectionConfig {
    /// Creates the default local configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the user.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Checks the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`PgDiffError::Config`] for an empty host or user, or port 0.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(invalid("host", "must not be empty"));
        }
        if self.user.trim().is_empty() {
            return Err(invalid("user", "must not be empty"));
        }
        if self.port == 0 {
            return Err(invalid("port", "must not be 0"));
        }
        Ok(())
    }

    /// Renders a libpq key/value connection string for `database`.
    #[must_use]
    pub fn dsn(&self, database: &str) -> String {
        format!(
            "host={} port={} user={} dbname={} sslmode=disable password={}",
            self.host, self.port, self.user, database, self.password
        )
    }

    /// Builds `sqlx` connection options for `database`.
    ///
    /// # Errors
    ///
    /// Fails if the settings don't [`validate`](Self::validate) or the
    /// database name is empty.
    pub fn connect_options(&self, database: &str) -> Result<PgConnectOptions> {
        self.validate()?;
        if database.trim().is_empty() {
            return Err(invalid("database", "must not be empty"));
        }
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(database)
            .ssl_mode(PgSslMode::Disable);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}

fn invalid(field: &'static str, message: &str) -> PgDiffError {
    PgDiffError::Config {
        field,
        message: message.to_string(),
    }
}
