use thiserror::Error;

pub type Result<T> = std::result::Result<T, HandoverError>;

#[derive(Debug, Error)]
pub enum HandoverError {
    #[error("Unknown lane: {0}")]
    UnknownLane(String),

    #[error("Unknown form field: {0}")]
    UnknownFormField(String),

    #[error("Invalid split policy: {0}")]
    InvalidSplitPolicy(String),

    #[error("Invalid insert edge: {0}")]
    InvalidInsertEdge(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<toml::de::Error> for HandoverError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}
