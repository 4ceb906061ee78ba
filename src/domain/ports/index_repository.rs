use crate::domain::entities::catalog_entry::CatalogEntry;
use crate::domain::error::DomainError;
use crate::domain::services::vector_store::VectorStore;

/// Write side of a persisted index snapshot.
pub trait IndexRepository: Send + Sync {
    /// Replaces vectors and catalog together; readers never see a mix of old and new.
    fn replace_all(&self, store: &VectorStore, entries: &[CatalogEntry]) -> Result<(), DomainError>;
}
