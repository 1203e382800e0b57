use lingua_order::OrderLimits;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON file with `courses` and `tutors` arrays
    pub seed_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_max_orders")]
    pub max_orders_per_account: usize,
    #[serde(default = "default_max_persons")]
    pub max_persons: u32,
    #[serde(default = "default_min_tutor_hours")]
    pub min_tutor_hours: u32,
    #[serde(default = "default_max_tutor_hours")]
    pub max_tutor_hours: u32,
}

fn default_max_orders() -> usize { 10 }
fn default_max_persons() -> u32 { 20 }
fn default_min_tutor_hours() -> u32 { 1 }
fn default_max_tutor_hours() -> u32 { 40 }

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            max_orders_per_account: default_max_orders(),
            max_persons: default_max_persons(),
            min_tutor_hours: default_min_tutor_hours(),
            max_tutor_hours: default_max_tutor_hours(),
        }
    }
}

impl BusinessRules {
    pub fn order_limits(&self) -> OrderLimits {
        OrderLimits {
            max_persons: self.max_persons,
            min_tutor_hours: self.min_tutor_hours,
            max_tutor_hours: self.max_tutor_hours,
            max_orders_per_account: self.max_orders_per_account,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `LINGUA_SERVER__PORT=9000` overrides `server.port`
            .add_source(config::Environment::with_prefix("LINGUA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
