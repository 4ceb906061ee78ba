use crate::domain::entities::feature_vector::FeatureVector;
use crate::domain::entities::query_result::QueryResult;
use crate::domain::error::DomainError;
use crate::domain::ports::feature_extractor::FeatureExtractor;
use crate::domain::ports::metadata_source::MetadataSource;
use crate::domain::ports::vector_source::VectorSource;
use crate::domain::services::assembler::assemble;
use crate::domain::services::catalog::Catalog;
use crate::domain::services::ranker::Ranker;
use crate::domain::services::vector_store::VectorStore;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Read-only state built once at startup and shared by every query.
#[derive(Debug)]
pub struct SearchContext {
    pub store: VectorStore,
    pub catalog: Catalog,
    pub loaded_at: DateTime<Utc>,
}

impl SearchContext {
    /// Fails without exposing anything if either source is unusable.
    pub fn load(
        vectors: &dyn VectorSource,
        metadata: &dyn MetadataSource,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(VectorStore::load(vectors)?, Catalog::load(metadata)?))
    }

    pub fn new(store: VectorStore, catalog: Catalog) -> Self {
        Self {
            store,
            catalog,
            loaded_at: Utc::now(),
        }
    }
}

pub struct SearchUseCase {
    context: Arc<SearchContext>,
    extractor: Arc<dyn FeatureExtractor>,
    ranker: Ranker,
}

impl SearchUseCase {
    pub fn new(
        context: Arc<SearchContext>,
        extractor: Arc<dyn FeatureExtractor>,
        ranker: Ranker,
    ) -> Self {
        Self { context, extractor, ranker }
    }

    /// Rank the catalog against an already extracted vector.
    pub fn search_vector(
        &self,
        query: &FeatureVector,
        k: usize,
    ) -> Result<Vec<QueryResult>, DomainError> {
        let store = &self.context.store;
        if query.dimension() != store.dimension() {
            return Err(DomainError::DimensionMismatch {
                expected: store.dimension(),
                actual: query.dimension(),
            });
        }
        let started = Instant::now();
        let hits = self.ranker.top_k(query, store, k)?;
        let results = assemble(&hits, store, &self.context.catalog);
        tracing::debug!(
            k,
            returned = results.len(),
            scanned = store.size(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Ranked catalog"
        );
        Ok(results)
    }

    /// Extract the image's vector, then rank. Extractor failures fail the query.
    pub async fn search_image(
        &self,
        image: &Path,
        k: usize,
    ) -> Result<Vec<QueryResult>, DomainError> {
        let span = tracing::info_span!(
            "search_image",
            query_id = %uuid::Uuid::new_v4(),
            image = %image.display()
        );
        async {
            let query = self.extractor.extract(image).await.map_err(|e| match e {
                DomainError::EmbeddingUnavailable(_) | DomainError::DimensionMismatch { .. } => e,
                other => DomainError::EmbeddingUnavailable(other.to_string()),
            })?;
            self.search_vector(&query, k)
        }
        .instrument(span)
        .await
    }
}
