use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Count mismatch: {vectors} vectors but {ids} identifiers")]
    CountMismatch { vectors: usize, ids: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Load error: {0}")]
    Load(String),

    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
