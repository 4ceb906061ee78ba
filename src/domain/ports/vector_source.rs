use crate::domain::error::DomainError;

/// Two positionally aligned sequences: raw vectors and their catalog identifiers.
pub trait VectorSource: Send + Sync {
    fn load_vectors(&self) -> Result<Vec<Vec<f32>>, DomainError>;
    fn load_ids(&self) -> Result<Vec<String>, DomainError>;
}
