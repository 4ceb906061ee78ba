use crate::domain::entities::catalog_entry::CatalogEntry;
use crate::domain::error::DomainError;

/// Product metadata records in a deterministic load order.
pub trait MetadataSource: Send + Sync {
    fn load_entries(&self) -> Result<Vec<CatalogEntry>, DomainError>;
}
