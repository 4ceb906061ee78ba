use crate::domain::error::DomainError;
use crate::domain::ports::index_repository::IndexRepository;
use crate::domain::ports::metadata_source::MetadataSource;
use crate::domain::ports::vector_source::VectorSource;
use crate::domain::services::catalog::Catalog;
use crate::domain::services::vector_store::VectorStore;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub vectors: usize,
    pub dimension: usize,
    pub catalog_entries: usize,
}

/// Copies validated sources into a persisted snapshot.
pub struct ImportUseCase {
    repo: Arc<dyn IndexRepository>,
}

impl ImportUseCase {
    pub fn new(repo: Arc<dyn IndexRepository>) -> Self {
        Self { repo }
    }

    pub fn execute(
        &self,
        vectors: &dyn VectorSource,
        metadata: &dyn MetadataSource,
    ) -> Result<ImportSummary, DomainError> {
        // Building the store first means a misaligned source never reaches the repo.
        let store = VectorStore::load(vectors)?;
        let catalog = Catalog::load(metadata)?;
        self.repo.replace_all(&store, catalog.entries())?;

        let summary = ImportSummary {
            vectors: store.size(),
            dimension: store.dimension(),
            catalog_entries: catalog.len(),
        };
        tracing::info!(
            vectors = summary.vectors,
            dimension = summary.dimension,
            catalog_entries = summary.catalog_entries,
            "Imported index snapshot"
        );
        Ok(summary)
    }
}
