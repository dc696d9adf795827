pub mod app_config;
pub mod config;
pub mod cookie;
pub mod display;
pub mod entities;
pub mod products;
pub mod query_string;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use entities::{Brand, Category, Color, Entity, EntityKind, Retailer};
pub use products::{Product, ProductId, SortOrder};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
