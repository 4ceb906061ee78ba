use crate::domain::entities::feature_vector::FeatureVector;
use crate::domain::error::DomainError;
use crate::domain::ports::feature_extractor::FeatureExtractor;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Remote model server: image bytes in, `{"embedding": [...]}` out.
pub struct HttpExtractor {
    client: Client,
    base_url: String,
    dimension: Option<usize>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl HttpExtractor {
    pub fn new(
        base_url: String,
        dimension: Option<usize>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::InvalidInput(format!("HTTP client error: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            dimension,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/embed", self.base_url)
    }
}

#[async_trait::async_trait]
impl FeatureExtractor for HttpExtractor {
    async fn extract(&self, image: &Path) -> Result<FeatureVector, DomainError> {
        let bytes = tokio::fs::read(image).await.map_err(|e| {
            DomainError::EmbeddingUnavailable(format!("Cannot read image {}: {e}", image.display()))
        })?;

        let resp = self
            .client
            .post(self.endpoint())
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                DomainError::EmbeddingUnavailable(format!("Extractor request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::EmbeddingUnavailable(format!(
                "Extractor returned {status}: {body}"
            )));
        }

        let result: EmbedResponse = resp.json().await.map_err(|e| {
            DomainError::EmbeddingUnavailable(format!("Malformed extractor response: {e}"))
        })?;
        if let Some(expected) = self.dimension {
            if result.embedding.len() != expected {
                return Err(DomainError::DimensionMismatch {
                    expected,
                    actual: result.embedding.len(),
                });
            }
        }
        FeatureVector::new(result.embedding).map_err(|e| {
            DomainError::EmbeddingUnavailable(format!("Extractor produced an invalid vector: {e}"))
        })
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}
