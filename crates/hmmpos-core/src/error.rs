use thiserror::Error;

/// Errors that can occur while training, decoding or restoring a model.
#[derive(Debug, Error)]
pub enum HmmError {
    /// Empty corpus, empty sentence or empty token sequence.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A decoder configuration value is out of range.
    #[error("invalid decoder config: {0}")]
    InvalidConfig(String),

    /// A persisted model blob has the wrong format, version or contents.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The persisted blob is not well-formed JSON.
    #[error("model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HmmError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }
}

/// Result type alias for hmmpos operations.
pub type Result<T> = std::result::Result<T, HmmError>;
