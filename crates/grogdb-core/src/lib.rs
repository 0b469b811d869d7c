pub mod app_config;
pub mod config;
pub mod corrections;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use corrections::{load_corrections, Correction, Corrections};
pub use records::{OutputRecord, PriceTier, Pricing, PricingGroup, Properties, Vessel};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read corrections file {path}: {source}")]
    CorrectionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corrections file {path}: {source}")]
    CorrectionsFileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrections validation failed: {0}")]
    Validation(String),
}
