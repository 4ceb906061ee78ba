use crate::domain::entities::feature_vector::FeatureVector;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_source::VectorSource;

/// Frozen collection of catalog embeddings, indexed by insertion order.
///
/// Every vector has the same dimension and there is exactly one identifier
/// per vector. Nothing mutates the store after construction, so it can be
/// shared across concurrent queries without locking.
#[derive(Debug, Clone)]
pub struct VectorStore {
    dimension: usize,
    ids: Vec<String>,
    vectors: Vec<FeatureVector>,
    squared_norms: Vec<f64>,
}

impl VectorStore {
    pub fn load(source: &dyn VectorSource) -> Result<Self, DomainError> {
        let vectors = source.load_vectors()?;
        let ids = source.load_ids()?;
        let store = Self::from_parts(vectors, ids)?;
        tracing::info!(
            vectors = store.size(),
            dimension = store.dimension(),
            "Loaded vector store"
        );
        Ok(store)
    }

    pub fn from_parts(vectors: Vec<Vec<f32>>, ids: Vec<String>) -> Result<Self, DomainError> {
        if vectors.len() != ids.len() {
            return Err(DomainError::CountMismatch {
                vectors: vectors.len(),
                ids: ids.len(),
            });
        }
        let dimension = match vectors.first() {
            None => return Err(DomainError::Load("Vector source contains no vectors".into())),
            Some(first) if first.is_empty() => {
                return Err(DomainError::Load("Vector 0 has no components".into()))
            }
            Some(first) => first.len(),
        };

        let mut frozen = Vec::with_capacity(vectors.len());
        let mut squared_norms = Vec::with_capacity(vectors.len());
        for (index, raw) in vectors.into_iter().enumerate() {
            if raw.len() != dimension {
                tracing::error!(
                    index,
                    expected = dimension,
                    actual = raw.len(),
                    "Vector has wrong dimension"
                );
                return Err(DomainError::DimensionMismatch {
                    expected: dimension,
                    actual: raw.len(),
                });
            }
            let vector = FeatureVector::new(raw).map_err(|e| {
                DomainError::InvalidInput(format!("Vector {index} ({}): {e}", ids[index]))
            })?;
            let norm = vector.squared_norm();
            if norm == 0.0 {
                tracing::warn!(
                    index,
                    id = %ids[index],
                    "Catalog vector has zero norm; it will score 0 against every query"
                );
            }
            squared_norms.push(norm);
            frozen.push(vector);
        }

        Ok(Self {
            dimension,
            ids,
            vectors: frozen,
            squared_norms,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn size(&self) -> usize {
        self.vectors.len()
    }

    /// Restartable, read-only walk over `(index, vector)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FeatureVector)> + '_ {
        self.vectors.iter().enumerate()
    }

    pub fn vector(&self, index: usize) -> Option<&FeatureVector> {
        self.vectors.get(index)
    }

    pub fn id(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Precomputed at load so ranking only pays for the dot product.
    pub fn squared_norm(&self, index: usize) -> f64 {
        self.squared_norms.get(index).copied().unwrap_or(0.0)
    }

    pub(crate) fn squared_norms(&self) -> &[f64] {
        &self.squared_norms
    }

    pub(crate) fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }
}
