pub mod embeddings;
pub mod json;
pub mod sqlite;
