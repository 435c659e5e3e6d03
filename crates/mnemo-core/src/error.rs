use thiserror::Error;

/// Top-level error type for embedding Mnemo in a larger process.
///
/// Lower layers define their own error enums (e.g. the store's
/// `StoreError`); this type exists so callers that wire config loading
/// and store access together have a single error to bubble up.
#[derive(Error, Debug)]
pub enum MnemoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
