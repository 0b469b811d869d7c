use grogdb_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read catalogue {path}: {source}")]
    InputIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON deserialization error for catalogue {path}: {source}")]
    InputParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Corrections(#[from] ConfigError),

    #[error("failed to write output {path}: {source}")]
    OutputIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output records: {0}")]
    Serialize(#[source] serde_json::Error),
}
