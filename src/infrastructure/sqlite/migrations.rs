use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS vectors (
            position INTEGER PRIMARY KEY,
            image_id TEXT NOT NULL,
            vector BLOB NOT NULL
        );

        CREATE TABLE IF NOT EXISTS products (
            position INTEGER PRIMARY KEY,
            product_id INTEGER,
            brand TEXT NOT NULL,
            series TEXT NOT NULL DEFAULT '',
            model TEXT NOT NULL,
            year TEXT,
            image TEXT NOT NULL,
            source_url TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_vectors_image ON vectors(image_id);
        "
    ).map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
