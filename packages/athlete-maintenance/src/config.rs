use anyhow::{Context, Result};
use dotenvy::dotenv;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::fmt;

/// Application name reported to Postgres for every maintenance session
pub const APPLICATION_NAME: &str = "clear_pin_reset";

/// Database connection settings loaded from environment variables
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl DatabaseConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup, falling back to
    /// the local development defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: var_or("DB_HOST", "localhost"),
            port: var_or("DB_PORT", "5432")
                .parse()
                .context("DB_PORT must be a valid port number")?,
            database: var_or("DB_NAME", "boathouse_etl"),
            username: var_or("DB_USER", "postgres"),
            password: var_or("DB_PASSWORD", "password"),
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.username)
            .password(&self.password)
            .application_name(APPLICATION_NAME)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
