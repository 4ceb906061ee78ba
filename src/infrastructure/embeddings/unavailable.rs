use crate::domain::entities::feature_vector::FeatureVector;
use crate::domain::error::DomainError;
use crate::domain::ports::feature_extractor::FeatureExtractor;
use std::path::Path;

/// Used when no extractor is configured. Image queries fail instead of
/// ranking a placeholder vector.
pub struct UnavailableExtractor;

#[async_trait::async_trait]
impl FeatureExtractor for UnavailableExtractor {
    async fn extract(&self, image: &Path) -> Result<FeatureVector, DomainError> {
        Err(DomainError::EmbeddingUnavailable(format!(
            "No feature extractor configured; cannot embed {}",
            image.display()
        )))
    }

    fn dimension(&self) -> Option<usize> {
        None
    }
}
