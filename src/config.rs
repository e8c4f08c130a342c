use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Statements slower than this are logged at WARN
    pub slow_statement_secs: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/checkins";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: 20,
                acquire_timeout_secs: 10,
                slow_statement_secs: 5,
                run_migrations: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Layered load: built-in defaults, then an optional `checkins.toml`
    /// (or `.json`/`.yaml`) in the working directory, then
    /// `CHECKINS__SECTION__KEY` environment variables. A plain
    /// `DATABASE_URL` wins over everything for the database url.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            .set_default("database.max_connections", 20_i64)?
            .set_default("database.acquire_timeout_secs", 10_i64)?
            .set_default("database.slow_statement_secs", 5_i64)?
            .set_default("database.run_migrations", true)?
            .set_default("logging.level", "info")?
            .add_source(File::with_name("checkins").required(false))
            .add_source(
                Environment::with_prefix("CHECKINS")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }

    /// Parsed log level, INFO when the configured value is not a level name
    pub fn log_level(&self) -> tracing::Level {
        self.logging.level.parse().unwrap_or(tracing::Level::INFO)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn bad_log_level_falls_back_to_info() {
        let mut config = AppConfig::default();
        config.logging.level = "chatty".to_string();
        assert_eq!(config.log_level(), tracing::Level::INFO);
        config.logging.level = "debug".to_string();
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }
}
