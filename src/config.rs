use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the built front end. When set, unknown GET paths
    /// fall back to its `index.html`.
    pub static_dir: Option<String>,
}

/// Which store implementation backs the user resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    /// Full connection string; takes precedence over the individual parts.
    #[serde(skip_serializing)]
    pub url: Option<SecretString>,
    pub user: String,
    #[serde(skip_serializing, default = "default_password")]
    pub password: SecretString,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            // Override with environment variables using `BLOODLINK__` prefix and `__` separator
            // e.g., BLOODLINK__DATABASE__USER="my_user"
            .add_source(
                config::Environment::with_prefix("BLOODLINK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            // Hosting platforms hand these out without our prefix
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl ServerConfig {
    /// The `host:port` pair the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: None,
        }
    }
}

impl DatabaseConfig {
    /// Constructs the database connection string.
    pub fn connection_string(&self) -> SecretString {
        if let Some(url) = &self.url {
            return url.clone();
        }

        SecretString::from(format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database
        ))
    }
}

fn default_password() -> SecretString {
    SecretString::from("password".to_string())
}

// Default values for the database configuration
impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            url: None,
            user: "postgres".to_string(),
            password: default_password(),
            host: "localhost".to_string(),
            port: 5432,
            database: "postgres".to_string(),
            max_connections: 10,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets are skipped by serde
        match serde_json::to_string_pretty(&self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "Error serializing config"),
        }
    }
}
