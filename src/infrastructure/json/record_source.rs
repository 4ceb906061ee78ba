use crate::domain::entities::catalog_entry::{CatalogEntry, UNKNOWN};
use crate::domain::error::DomainError;
use crate::domain::ports::metadata_source::MetadataSource;
use crate::domain::ports::vector_source::VectorSource;
use crate::infrastructure::json::read_json;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Per-record layout: one `embeddings.json` whose items carry both the
/// vector and the product fields.
///
/// ```json
/// [{ "image": "00001.jpg", "embedding": [0.1, ...], "brand": "Fender", "model": "Player" }]
/// ```
pub struct JsonRecordSource {
    path: PathBuf,
    records: OnceLock<Vec<EmbeddingRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingRecord {
    image: String,
    embedding: Vec<f32>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    series: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

impl JsonRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: OnceLock::new(),
        }
    }

    /// Parsed once and reused for both the vector and the metadata side.
    fn records(&self) -> Result<&[EmbeddingRecord], DomainError> {
        if let Some(records) = self.records.get() {
            return Ok(records.as_slice());
        }
        let parsed: Vec<EmbeddingRecord> = read_json(&self.path)?;
        Ok(self.records.get_or_init(|| parsed).as_slice())
    }
}

impl VectorSource for JsonRecordSource {
    fn load_vectors(&self) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(self.records()?.iter().map(|r| r.embedding.clone()).collect())
    }

    fn load_ids(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.records()?.iter().map(|r| r.image.clone()).collect())
    }
}

impl MetadataSource for JsonRecordSource {
    fn load_entries(&self) -> Result<Vec<CatalogEntry>, DomainError> {
        Ok(self
            .records()?
            .iter()
            .map(|r| CatalogEntry {
                id: None,
                brand: r.brand.clone().unwrap_or_else(|| UNKNOWN.to_string()),
                series: r.series.clone().unwrap_or_default(),
                model: r.model.clone().unwrap_or_else(|| UNKNOWN.to_string()),
                year: None,
                image: r.image.clone(),
                source_url: None,
            })
            .collect())
    }
}
