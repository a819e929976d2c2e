//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `weather`: Open-Meteo client settings
//! - `ingestion`: batch ingestion settings and the location list

use std::fmt;

use serde::{Deserialize, Serialize};

mod database;
mod ingestion;
mod server;
mod weather;

pub use database::DatabaseConfig;
pub use ingestion::{IngestionConfig, LocationConfig};
pub use server::{LogFormat, ServerConfig};
pub use weather::WeatherAppConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Production hides internal error details from HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Ingestion configuration
    #[serde(default)]
    pub ingestion: IngestionConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config.toml` and the
    /// environment.
    ///
    /// Environment variables use the `WEATHERAPI_` prefix and `__` between
    /// nested keys, e.g. `WEATHERAPI_DATABASE__MAX_CONNECTIONS=2`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `config.toml`
    pub fn load_from(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::with_name(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., WEATHERAPI_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("WEATHERAPI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Effective environment, development when unset
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Whether HTTP error responses may carry internal details
    #[must_use]
    pub fn expose_internal_errors(&self) -> bool {
        self.environment() == Environment::Development
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_default() {
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", Environment::Development), "development");
        assert_eq!(format!("{}", Environment::Production), "production");
    }

    #[test]
    fn environment_from_str() {
        assert_eq!(
            "prod".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "DEVELOPMENT".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn environment_deserialize() {
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Production);
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.path, "data/weather.db");
        assert_eq!(config.ingestion.locations.len(), 3);
        assert!(config.expose_internal_errors());
    }

    #[test]
    fn production_hides_internal_errors() {
        let json = r#"{"environment":"production"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert!(!config.expose_internal_errors());
    }

    #[test]
    fn app_config_partial_deserialization() {
        let json = r#"{"server":{"port":8080},"ingestion":{"forecast_days":3}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.ingestion.forecast_days, 3);
        assert_eq!(config.ingestion.interval_hours, 1);
    }

    #[test]
    fn load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.toml");
        std::fs::write(
            &path,
            r#"
environment = "production"

[database]
path = "/tmp/forecasts.db"

[[ingestion.locations]]
name = "paphos"
latitude = 34.7754
longitude = 32.4245
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.database.path, "/tmp/forecasts.db");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.ingestion.locations.len(), 1);
        assert_eq!(config.ingestion.locations[0].name, "paphos");
    }
}
