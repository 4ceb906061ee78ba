//! Shared test helpers.
#![allow(dead_code)]

use lookalike::domain::entities::catalog_entry::CatalogEntry;
use lookalike::domain::entities::feature_vector::FeatureVector;
use lookalike::domain::error::DomainError;
use lookalike::domain::ports::feature_extractor::FeatureExtractor;
use lookalike::domain::ports::metadata_source::MetadataSource;
use lookalike::domain::ports::vector_source::VectorSource;
use lookalike::infrastructure::embeddings::unavailable::UnavailableExtractor;
use lookalike::Lookalike;
use std::path::Path;
use std::sync::Arc;

pub struct InMemorySource {
    pub vectors: Vec<Vec<f32>>,
    pub ids: Vec<String>,
    pub entries: Vec<CatalogEntry>,
}

impl VectorSource for InMemorySource {
    fn load_vectors(&self) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(self.vectors.clone())
    }

    fn load_ids(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.ids.clone())
    }
}

impl MetadataSource for InMemorySource {
    fn load_entries(&self) -> Result<Vec<CatalogEntry>, DomainError> {
        Ok(self.entries.clone())
    }
}

/// Returns the same vector for every image.
pub struct FixedExtractor(pub Vec<f32>);

#[async_trait::async_trait]
impl FeatureExtractor for FixedExtractor {
    async fn extract(&self, _image: &Path) -> Result<FeatureVector, DomainError> {
        FeatureVector::new(self.0.clone())
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.0.len())
    }
}

/// Three 2-d vectors `[1,0]`, `[0,1]`, `[1,1]`; the third has no catalog entry.
pub fn three_vector_source() -> InMemorySource {
    InMemorySource {
        vectors: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
        ids: vec!["00001.jpg".into(), "00002.jpg".into(), "00003.jpg".into()],
        entries: vec![
            CatalogEntry::new("Fender", "Stratocaster", "Player", "data/raw/00001.jpg"),
            CatalogEntry::new("Gibson", "Les Paul", "Standard", "data/raw/00002.jpg"),
        ],
    }
}

pub fn setup() -> Lookalike {
    let source = three_vector_source();
    Lookalike::from_sources(&source, &source, Arc::new(UnavailableExtractor)).unwrap()
}

pub fn setup_with_extractor(extractor: Arc<dyn FeatureExtractor>) -> Lookalike {
    let source = three_vector_source();
    Lookalike::from_sources(&source, &source, extractor).unwrap()
}

pub fn query(values: &[f32]) -> FeatureVector {
    FeatureVector::new(values.to_vec()).unwrap()
}
