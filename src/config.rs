use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use sqlx::postgres::PgConnectOptions;

use crate::analytics::DEFAULT_ANALYTICS_YEAR;
use crate::ingest::{IngestSettings, DEFAULT_BATCH_SIZE};

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8000;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_NAME: &str = "moniepoint_analytics";
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 0;
pub const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub ingest: IngestConfig,
    pub analytics_year: i32,
    pub log_level: String
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection target; credentials are kept as separate fields, never spliced into a URL.
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64
}

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub data_dir: PathBuf,
    pub settings: IngestSettings
}

impl Config {
    /// Loads configuration from the process environment, after reading an optional `.env` file.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        let config = Config {
            server: ServerConfig {
                host: value("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
                port: parsed(value("SERVER_PORT"), "SERVER_PORT", DEFAULT_SERVER_PORT)?
            },
            database: DatabaseConfig {
                connect_options: match value("DATABASE_URL") {
                    Some(url) => PgConnectOptions::from_str(&url).context("DATABASE_URL is not a valid PostgreSQL URL")?,
                    None => connect_options_from_parts(&value)?
                },
                max_connections: parsed(value("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
                min_connections: parsed(value("DB_MIN_CONNECTIONS"), "DB_MIN_CONNECTIONS", DEFAULT_DB_MIN_CONNECTIONS)?,
                acquire_timeout_secs: parsed(value("DB_ACQUIRE_TIMEOUT_SECS"), "DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_DB_ACQUIRE_TIMEOUT_SECS)?
            },
            ingest: IngestConfig {
                data_dir: PathBuf::from(value("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())),
                settings: IngestSettings {
                    batch_size: parsed(value("INGEST_BATCH_SIZE"), "INGEST_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
                    continue_on_batch_error: parsed(value("INGEST_CONTINUE_ON_BATCH_ERROR"), "INGEST_CONTINUE_ON_BATCH_ERROR", false)?
                }
            },
            analytics_year: parsed(value("ANALYTICS_YEAR"), "ANALYTICS_YEAR", DEFAULT_ANALYTICS_YEAR)?,
            log_level: value("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("SERVER_PORT must be greater than 0");
        }

        if self.database.max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            bail!(
                "DB_MIN_CONNECTIONS ({}) cannot be greater than DB_MAX_CONNECTIONS ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.ingest.settings.batch_size == 0 {
            bail!("INGEST_BATCH_SIZE must be greater than 0");
        }

        if !(1..=9998).contains(&self.analytics_year) {
            bail!("ANALYTICS_YEAR ({}) must be between 1 and 9998", self.analytics_year);
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parsed<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T> {
    match value {
        Some(raw) => match raw.parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => bail!("{key} has an invalid value [{raw}]")
        },
        None => Ok(default)
    }
}

fn connect_options_from_parts<F>(value: &F) -> Result<PgConnectOptions>
where
    F: Fn(&str) -> Option<String>,
{
    let host = value("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
    let port: u16 = parsed(value("DB_PORT"), "DB_PORT", DEFAULT_DB_PORT)?;
    let name = value("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
    let user = value("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string());

    let options = PgConnectOptions::new()
        .host(&host)
        .port(port)
        .database(&name)
        .username(&user);

    let options = match value("DB_PASSWORD") {
        Some(password) => options.password(&password),
        None => options
    };

    Ok(options)
}
