use crate::domain::entities::feature_vector::FeatureVector;
use crate::domain::error::DomainError;
use std::path::Path;

/// Black-box image embedder. Failures must surface as
/// `DomainError::EmbeddingUnavailable`, never as a placeholder vector.
#[async_trait::async_trait]
pub trait FeatureExtractor: Send + Sync {
    async fn extract(&self, image: &Path) -> Result<FeatureVector, DomainError>;

    /// Output dimension when known ahead of time.
    fn dimension(&self) -> Option<usize>;
}
