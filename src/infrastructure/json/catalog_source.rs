use crate::domain::entities::catalog_entry::CatalogEntry;
use crate::domain::error::DomainError;
use crate::domain::ports::metadata_source::MetadataSource;
use crate::infrastructure::json::read_json;
use std::path::PathBuf;

/// `products.json`: an array of catalog records.
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetadataSource for JsonCatalogSource {
    fn load_entries(&self) -> Result<Vec<CatalogEntry>, DomainError> {
        read_json(&self.path)
    }
}
