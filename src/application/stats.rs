use crate::application::search::SearchContext;
use crate::domain::services::catalog::Lookup;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub vectors: usize,
    pub dimension: usize,
    pub catalog_entries: usize,
    /// Store identifiers with no catalog entry; these rank as "Unknown".
    pub unmatched_ids: usize,
    pub zero_norm_vectors: usize,
    pub loaded_at: DateTime<Utc>,
}

pub struct StatsUseCase {
    context: Arc<SearchContext>,
}

impl StatsUseCase {
    pub fn new(context: Arc<SearchContext>) -> Self {
        Self { context }
    }

    pub fn stats(&self) -> IndexStats {
        let store = &self.context.store;
        let catalog = &self.context.catalog;
        let unmatched_ids = store
            .ids()
            .iter()
            .filter(|id| catalog.find(id) == Lookup::NotFound)
            .count();
        let zero_norm_vectors = (0..store.size())
            .filter(|i| store.squared_norm(*i) == 0.0)
            .count();
        IndexStats {
            vectors: store.size(),
            dimension: store.dimension(),
            catalog_entries: catalog.len(),
            unmatched_ids,
            zero_norm_vectors,
            loaded_at: self.context.loaded_at,
        }
    }
}
