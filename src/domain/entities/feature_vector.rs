use crate::domain::error::DomainError;
use std::sync::Arc;

/// Fixed-length image embedding. Immutable once built; clones share storage.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Arc<[f32]>);

impl FeatureVector {
    /// Rejects NaN and infinite components so every similarity has a total order.
    pub fn new(values: Vec<f32>) -> Result<Self, DomainError> {
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(DomainError::InvalidInput(format!(
                "Feature vector component {pos} is not finite ({})",
                values[pos]
            )));
        }
        Ok(FeatureVector(values.into()))
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Sum of squares, accumulated in f64 in component order.
    pub fn squared_norm(&self) -> f64 {
        self.0.iter().map(|x| (*x as f64) * (*x as f64)).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| *x == 0.0)
    }
}

impl TryFrom<Vec<f32>> for FeatureVector {
    type Error = DomainError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        FeatureVector::new(values)
    }
}
