//! Configuration management for the LotWatch backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with LOTWATCH_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Outgoing mail configuration
    pub mail: MailConfig,

    /// Report rendering configuration
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port (STARTTLS)
    pub smtp_port: u16,

    /// SMTP username; credentials are skipped entirely when absent
    pub username: Option<String>,

    /// SMTP password
    pub password: Option<String>,

    /// Sender address used on outgoing reports
    pub from_address: String,

    /// Sender display name
    pub from_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Language used when neither the request nor the settings decide one
    pub default_language: String,

    /// Directory the Arabic report fonts are probed in
    pub font_dir: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("LOTWATCH_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("mail.smtp_host", "smtp.gmail.com")?
            .set_default("mail.smtp_port", 587)?
            .set_default("mail.from_address", "reports@lotwatch.local")?
            .set_default("mail.from_name", "LotWatch")?
            .set_default("report.default_language", "fr")?
            .set_default("report.font_dir", "assets/fonts")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (LOTWATCH_ prefix)
            .add_source(
                Environment::with_prefix("LOTWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
