use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// Tunable search limits; the compiled-in defaults match the engine
/// contract (365-night stays, two-year horizon).
#[derive(Debug, Deserialize, Clone)]
pub struct SearchRules {
    #[serde(default = "default_max_nights")]
    pub max_stay_nights: u32,
    #[serde(default = "default_horizon")]
    pub max_horizon_days: u64,
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
}

fn default_max_nights() -> u32 {
    365
}

fn default_horizon() -> u64 {
    730
}

fn default_per_page() -> u32 {
    20
}

impl Default for SearchRules {
    fn default() -> Self {
        Self {
            max_stay_nights: default_max_nights(),
            max_horizon_days: default_horizon(),
            default_per_page: default_per_page(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("LODGIS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
