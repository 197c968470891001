use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {key}")]
    NotFound { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("get error: {0}")]
    Get(String),

    #[error("put error: {0}")]
    Put(String),

    #[error("delete error: {0}")]
    Delete(String),

    #[error("list error: {0}")]
    List(String),

    #[error("store config error: {0}")]
    Config(String),
}
