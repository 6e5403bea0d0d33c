use deskrank_core::{ConfigError, SourceType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("unsupported source kind: no seed formula configured for {0}")]
    UnsupportedSourceKind(SourceType),

    #[error("invalid discovery configuration: {0}")]
    Config(#[from] ConfigError),
}
