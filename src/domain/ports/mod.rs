pub mod feature_extractor;
pub mod index_repository;
pub mod metadata_source;
pub mod vector_source;
