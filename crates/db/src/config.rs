use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Default bound on a single database round trip.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 3;

/// Default pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Where the relational store lives and how hard we lean on it.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; takes precedence over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// Upper bound for acquiring a connection and for each statement.
    pub query_timeout: Duration,
}

impl DatabaseConfig {
    /// Load database settings from environment variables.
    ///
    /// | Env Var                 | Default     |
    /// |-------------------------|-------------|
    /// | `DATABASE_URL`          | unset       |
    /// | `DB_HOST`               | `localhost` |
    /// | `DB_PORT`               | `5432`      |
    /// | `DB_USER`               | `postgres`  |
    /// | `DB_PASSWORD`           | empty       |
    /// | `DB_NAME`               | `mytasks`   |
    /// | `DB_MAX_CONNECTIONS`    | `10`        |
    /// | `DB_QUERY_TIMEOUT_SECS` | `3`         |
    ///
    /// # Panics
    ///
    /// Panics if a numeric variable does not parse.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());

        let port: u16 = std::env::var("DB_PORT")
            .unwrap_or_else(|_| "5432".into())
            .parse()
            .expect("DB_PORT must be a valid u16");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let query_timeout_secs: u64 = std::env::var("DB_QUERY_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_QUERY_TIMEOUT_SECS.to_string())
            .parse()
            .expect("DB_QUERY_TIMEOUT_SECS must be a valid u64");

        Self {
            url,
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into()),
            port,
            user: std::env::var("DB_USER").unwrap_or_else(|_| "postgres".into()),
            password: std::env::var("DB_PASSWORD").unwrap_or_default(),
            name: std::env::var("DB_NAME").unwrap_or_else(|_| "mytasks".into()),
            max_connections,
            query_timeout: Duration::from_secs(query_timeout_secs),
        }
    }

    /// Connection options for the configured server.
    ///
    /// Parses `url` when present; otherwise assembles the options from the
    /// individual parts, so passwords never need URL-escaping.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}
