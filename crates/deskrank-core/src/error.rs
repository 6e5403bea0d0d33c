use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported source kind: {0}")]
    UnsupportedSourceKind(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read tuning file {path}: {source}")]
    TuningFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning file: {0}")]
    TuningFileParse(#[from] serde_yaml::Error),

    #[error("tuning validation failed: {0}")]
    Validation(String),
}
