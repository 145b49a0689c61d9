use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_days: u64,
    #[serde(default = "default_jwt_issuer")]
    pub issuer: String,
    #[serde(default = "default_jwt_audience")]
    pub audience: String,
}

fn default_jwt_issuer() -> String {
    "plant".to_string()
}

fn default_jwt_audience() -> String {
    "plant-web".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Key for transcript parsing.
    #[serde(default)]
    pub api_key: String,
    /// Key for the assistant; the transcript key is used when empty.
    #[serde(default)]
    pub assistant_api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            assistant_api_key: String::new(),
            model: default_model(),
            base_url: default_ai_base_url(),
            timeout_secs: default_ai_timeout_secs(),
        }
    }
}

impl AiConfig {
    pub fn assistant_key(&self) -> &str {
        if self.assistant_api_key.is_empty() {
            &self.api_key
        } else {
            &self.assistant_api_key
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_model() -> String {
    plant_ai::client::DEFAULT_MODEL.to_string()
}

fn default_ai_base_url() -> String {
    plant_ai::client::DEFAULT_BASE_URL.to_string()
}

fn default_ai_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Reference files are fetched from this URL when set.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Otherwise they are read from this directory.
    #[serde(default = "default_data_dir")]
    pub dir: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            dir: default_data_dir(),
            cache_ttl_secs: default_cache_ttl_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl DataConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PLANT__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite:plant.db")?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.expiration_days", 7)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PLANT")
                .separator("__")
                .try_parsing(true),
        );

        // Unprefixed variables used by existing deployments
        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("jwt.secret", jwt_secret)?;
        }
        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            builder = builder.set_override("ai.api_key", api_key)?;
        }
        if let Ok(api_key) = env::var("GEMINI_ASSISTANT_API_KEY") {
            builder = builder.set_override("ai.assistant_api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.data.cache_ttl_secs == 0 {
            return Err("Data cache_ttl_secs must be greater than 0".to_string());
        }
        if self.ai.timeout_secs == 0 {
            return Err("AI timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: "test_secret_key_minimum_32_characters_long".to_string(),
                expiration_days: 7,
                issuer: default_jwt_issuer(),
                audience: default_jwt_audience(),
            },
            ai: AiConfig::default(),
            data: DataConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_short_secret() {
        let mut config = config();
        config.jwt.secret = "short".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_cache_ttl() {
        let mut config = config();
        config.data.cache_ttl_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_assistant_key_falls_back_to_parser_key() {
        let mut config = config();
        config.ai.api_key = "parser".to_string();
        assert_eq!(config.ai.assistant_key(), "parser");

        config.ai.assistant_api_key = "assistant".to_string();
        assert_eq!(config.ai.assistant_key(), "assistant");
    }
}
