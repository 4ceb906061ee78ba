mod common;

use common::{query, InMemorySource};
use lookalike::application::import::ImportUseCase;
use lookalike::config::{Settings, SourceKind};
use lookalike::domain::entities::catalog_entry::CatalogEntry;
use lookalike::domain::error::DomainError;
use lookalike::domain::ports::metadata_source::MetadataSource;
use lookalike::domain::ports::vector_source::VectorSource;
use lookalike::infrastructure::embeddings::unavailable::UnavailableExtractor;
use lookalike::infrastructure::sqlite::index_repo::SqliteIndexRepo;
use lookalike::Lookalike;
use std::sync::Arc;

fn catalog_source() -> InMemorySource {
    let mut entry = CatalogEntry::new("Fender", "Stratocaster", "Player", "data/raw/00001.jpg");
    entry.id = Some(1);
    entry.year = Some("2021".into());
    entry.source_url = Some("https://example.com/p/1".into());
    InMemorySource {
        vectors: vec![vec![0.25, -1.5, 3.0], vec![1.0, 1.0, 1.0], vec![0.0, 2.0, -0.5]],
        ids: vec!["00001.jpg".into(), "00002.jpg".into(), "00003.jpg".into()],
        entries: vec![
            entry,
            CatalogEntry::new("Gibson", "Les Paul", "Standard", "data/raw/00002.jpg"),
        ],
    }
}

#[test]
fn test_import_then_reload_matches_source() {
    let source = catalog_source();
    let repo = Arc::new(SqliteIndexRepo::open(":memory:").unwrap());

    let summary = ImportUseCase::new(repo.clone()).execute(&source, &source).unwrap();
    assert_eq!(summary.vectors, 3);
    assert_eq!(summary.dimension, 3);
    assert_eq!(summary.catalog_entries, 2);

    assert_eq!(repo.load_vectors().unwrap(), source.vectors);
    assert_eq!(repo.load_ids().unwrap(), source.ids);
    assert_eq!(repo.load_entries().unwrap(), source.entries);

    let from_memory =
        Lookalike::from_sources(&source, &source, Arc::new(UnavailableExtractor)).unwrap();
    let from_sqlite =
        Lookalike::from_sources(repo.as_ref(), repo.as_ref(), Arc::new(UnavailableExtractor))
            .unwrap();
    let q = query(&[0.5, 0.5, 1.0]);
    assert_eq!(
        from_memory.search_vector(&q, 3).unwrap(),
        from_sqlite.search_vector(&q, 3).unwrap()
    );
}

#[test]
fn test_reimport_replaces_snapshot() {
    let repo = Arc::new(SqliteIndexRepo::open(":memory:").unwrap());
    let import = ImportUseCase::new(repo.clone());
    import.execute(&catalog_source(), &catalog_source()).unwrap();

    let smaller = InMemorySource {
        vectors: vec![vec![1.0, 0.0]],
        ids: vec!["00009.jpg".into()],
        entries: vec![],
    };
    import.execute(&smaller, &smaller).unwrap();

    assert_eq!(repo.load_ids().unwrap(), vec!["00009.jpg".to_string()]);
    assert!(repo.load_entries().unwrap().is_empty());
}

#[test]
fn test_misaligned_source_writes_nothing() {
    let repo = Arc::new(SqliteIndexRepo::open(":memory:").unwrap());
    let import = ImportUseCase::new(repo.clone());
    import.execute(&catalog_source(), &catalog_source()).unwrap();

    let broken = InMemorySource {
        vectors: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        ids: vec!["00001.jpg".into()],
        entries: vec![],
    };
    let err = import.execute(&broken, &broken).unwrap_err();
    assert!(matches!(err, DomainError::CountMismatch { .. }));
    assert_eq!(repo.load_ids().unwrap().len(), 3);
}

#[test]
fn test_import_snapshot_from_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        data_dir: dir.path().to_path_buf(),
        db_path: dir.path().join("lookalike.db"),
        source: SourceKind::Json,
        ..Settings::default()
    };
    std::fs::create_dir_all(dir.path().join("embeddings")).unwrap();
    std::fs::write(settings.embeddings_path(), "[[1.0, 0.0], [0.6, 0.8]]").unwrap();
    std::fs::write(settings.image_ids_path(), r#"["00001.jpg", "00002.jpg"]"#).unwrap();
    std::fs::write(
        settings.products_path(),
        r#"[{"brand": "Fender", "series": "Telecaster", "model": "Player", "image": "data/raw/00002.jpg"}]"#,
    )
    .unwrap();

    let summary =
        lookalike::import_snapshot(&settings, &settings.db_path.to_string_lossy()).unwrap();
    assert_eq!(summary.vectors, 2);

    let sqlite_settings = Settings { source: SourceKind::Sqlite, ..settings };
    let engine = Lookalike::open(&sqlite_settings).unwrap();
    let results = engine.search_vector(&query(&[0.0, 1.0]), 1).unwrap();
    assert_eq!(results[0].image, "00002.jpg");
    assert_eq!(results[0].model, "Telecaster Player");
    assert!((results[0].similarity - 0.8).abs() < 1e-6);
}

#[test]
fn test_import_rejects_sqlite_source() {
    let settings = Settings { source: SourceKind::Sqlite, ..Settings::default() };
    let err = lookalike::import_snapshot(&settings, ":memory:").unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
}
