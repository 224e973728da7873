use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the backend REST API lives. The frontend owns no data of its own;
/// every page is a round trip to this address.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3001".to_string()
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
    /// Layered load: baked-in defaults, then the config file (when it
    /// exists), then `RUNHUB__…` environment variables, then the legacy
    /// `API_BASE_URL` variable the deploy scripts still export. Later
    /// layers win.
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let file = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("api.base_url", default_api_base_url())?;

        if Path::new(&file).exists() {
            builder = builder.add_source(File::with_name(&file));
        }

        builder = builder.add_source(
            Environment::with_prefix("RUNHUB")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(base_url) = env::var("API_BASE_URL") {
            builder = builder.set_override("api.base_url", base_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| format!("api.base_url {:?} is invalid: {e}", self.api.base_url))?;
        Ok(())
    }
}
