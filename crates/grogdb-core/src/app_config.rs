use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for a transform run.
///
/// Every path is resolved relative to the process working directory; the
/// CLI may override any of them with flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Raw catalogue export (JSON array of retailer product records).
    pub input_path: PathBuf,
    /// Stockcode-keyed override file (JSON array).
    pub corrections_path: PathBuf,
    /// Destination of the enriched dataset.
    pub output_path: PathBuf,
}
