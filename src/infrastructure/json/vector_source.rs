use crate::domain::error::DomainError;
use crate::domain::ports::vector_source::VectorSource;
use crate::infrastructure::json::read_json;
use std::path::PathBuf;

/// Columnar layout: `embeddings.json` is an array of vectors and
/// `image_ids.json` the array of identifiers at the same positions.
pub struct JsonVectorSource {
    embeddings_path: PathBuf,
    ids_path: PathBuf,
}

impl JsonVectorSource {
    pub fn new(embeddings_path: impl Into<PathBuf>, ids_path: impl Into<PathBuf>) -> Self {
        Self {
            embeddings_path: embeddings_path.into(),
            ids_path: ids_path.into(),
        }
    }
}

impl VectorSource for JsonVectorSource {
    fn load_vectors(&self) -> Result<Vec<Vec<f32>>, DomainError> {
        read_json(&self.embeddings_path)
    }

    fn load_ids(&self) -> Result<Vec<String>, DomainError> {
        read_json(&self.ids_path)
    }
}
