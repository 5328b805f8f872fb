use serde::Deserialize;
use std::env;
use config::{Config as ConfigLib, ConfigError, Environment, File};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database connection URL
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables and config files
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        // Layer on the environment-specific values from config files if available
        if let Ok(env) = env::var("ENVIRONMENT") {
            builder = builder.add_source(File::with_name(&format!("config/{}", env)).required(false));
        }

        // Add settings from environment variables
        builder = builder.add_source(Environment::default().separator("__"));

        builder.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        ConfigLib::builder()
            .set_default("environment", "development")?
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "sqlite://flowchart.db")?
            .set_default("max_connections", 5)
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deserialize() {
        let config: Config = Config::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(config.is_development());
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.database_url, "sqlite://flowchart.db");
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn overrides_replace_defaults() {
        let config: Config = Config::defaults()
            .unwrap()
            .set_override("port", 9000)
            .unwrap()
            .set_override("database_url", "sqlite::memory:")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_url, "sqlite::memory:");
    }
}
