pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::import::{ImportSummary, ImportUseCase};
use crate::application::search::{SearchContext, SearchUseCase};
use crate::application::stats::{IndexStats, StatsUseCase};
use crate::config::{ExtractorKind, Settings, SourceKind};
use crate::domain::entities::feature_vector::FeatureVector;
use crate::domain::entities::query_result::QueryResult;
use crate::domain::error::DomainError;
use crate::domain::ports::feature_extractor::FeatureExtractor;
use crate::domain::ports::metadata_source::MetadataSource;
use crate::domain::ports::vector_source::VectorSource;
use crate::domain::services::ranker::Ranker;
use crate::infrastructure::embeddings::http::HttpExtractor;
use crate::infrastructure::embeddings::unavailable::UnavailableExtractor;
use crate::infrastructure::json::catalog_source::JsonCatalogSource;
use crate::infrastructure::json::record_source::JsonRecordSource;
use crate::infrastructure::json::vector_source::JsonVectorSource;
use crate::infrastructure::sqlite::index_repo::SqliteIndexRepo;
use std::path::Path;
use std::sync::Arc;

pub struct Lookalike {
    search_uc: SearchUseCase,
    stats_uc: StatsUseCase,
}

impl Lookalike {
    /// Loads the index described by `settings` and wires the configured extractor.
    pub fn open(settings: &Settings) -> Result<Self, DomainError> {
        let ranker = Ranker::new(settings.parallel_threshold);
        let context = match settings.source {
            SourceKind::Json => SearchContext::load(
                &JsonVectorSource::new(settings.embeddings_path(), settings.image_ids_path()),
                &JsonCatalogSource::new(settings.products_path()),
            )?,
            SourceKind::Records => {
                let records = JsonRecordSource::new(settings.embeddings_path());
                SearchContext::load(&records, &records)?
            }
            SourceKind::Sqlite => {
                let repo = SqliteIndexRepo::open_existing(&settings.db_path().to_string_lossy())?;
                SearchContext::load(&repo, &repo)?
            }
        };

        let extractor: Arc<dyn FeatureExtractor> = match settings.extractor {
            ExtractorKind::Http => Arc::new(HttpExtractor::new(
                settings.extractor_url.clone(),
                Some(context.store.dimension()),
                settings.extractor_timeout,
            )?),
            ExtractorKind::None => Arc::new(UnavailableExtractor),
        };

        Ok(Self::with_context(Arc::new(context), extractor, ranker))
    }

    pub fn from_sources(
        vectors: &dyn VectorSource,
        metadata: &dyn MetadataSource,
        extractor: Arc<dyn FeatureExtractor>,
    ) -> Result<Self, DomainError> {
        let context = SearchContext::load(vectors, metadata)?;
        Ok(Self::with_context(Arc::new(context), extractor, Ranker::default()))
    }

    pub fn with_context(
        context: Arc<SearchContext>,
        extractor: Arc<dyn FeatureExtractor>,
        ranker: Ranker,
    ) -> Self {
        if let Some(dim) = extractor.dimension() {
            if dim != context.store.dimension() {
                tracing::warn!(
                    extractor = dim,
                    store = context.store.dimension(),
                    "Extractor dimension differs from stored vectors; \
                     image queries will be rejected"
                );
            }
        }
        Self {
            search_uc: SearchUseCase::new(context.clone(), extractor, ranker),
            stats_uc: StatsUseCase::new(context),
        }
    }

    pub fn search_vector(
        &self,
        query: &FeatureVector,
        k: usize,
    ) -> Result<Vec<QueryResult>, DomainError> {
        self.search_uc.search_vector(query, k)
    }

    pub async fn search_image(
        &self,
        image: &Path,
        k: usize,
    ) -> Result<Vec<QueryResult>, DomainError> {
        self.search_uc.search_image(image, k).await
    }

    pub fn stats(&self) -> IndexStats {
        self.stats_uc.stats()
    }
}

/// Validates the JSON sources named by `settings` and writes them into the
/// SQLite snapshot at `db_path`.
pub fn import_snapshot(settings: &Settings, db_path: &str) -> Result<ImportSummary, DomainError> {
    let repo = Arc::new(SqliteIndexRepo::open(db_path)?);
    let import = ImportUseCase::new(repo);
    match settings.source {
        SourceKind::Json => import.execute(
            &JsonVectorSource::new(settings.embeddings_path(), settings.image_ids_path()),
            &JsonCatalogSource::new(settings.products_path()),
        ),
        SourceKind::Records => {
            let records = JsonRecordSource::new(settings.embeddings_path());
            import.execute(&records, &records)
        }
        SourceKind::Sqlite => Err(DomainError::InvalidInput(
            "Import reads JSON sources; set LOOKALIKE_SOURCE to json or records".into(),
        )),
    }
}
