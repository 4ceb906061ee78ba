use crate::domain::entities::catalog_entry::CatalogEntry;
use crate::domain::error::DomainError;
use crate::domain::ports::index_repository::IndexRepository;
use crate::domain::ports::metadata_source::MetadataSource;
use crate::domain::ports::vector_source::VectorSource;
use crate::domain::services::vector_store::VectorStore;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::{params, Connection, OpenFlags};
use std::sync::Mutex;

/// Index snapshot in SQLite. Vectors are little-endian f32 blobs; `position`
/// preserves load order for both tables.
pub struct SqliteIndexRepo {
    conn: Mutex<Connection>,
}

impl SqliteIndexRepo {
    pub fn open(db_path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        Self::new(conn)
    }

    /// Opens a snapshot that must already exist; never creates one.
    pub fn open_existing(db_path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|e| DomainError::Load(format!("Cannot open snapshot {db_path}: {e}")))?;
        Self::new(conn)
    }

    pub fn new(conn: Connection) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Option<Vec<f32>> {
        if bytes.len() % 4 != 0 {
            return None;
        }
        Some(
            bytes
                .chunks_exact(4)
                .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                .collect(),
        )
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))
    }
}

impl VectorSource for SqliteIndexRepo {
    fn load_vectors(&self) -> Result<Vec<Vec<f32>>, DomainError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT position, vector FROM vectors ORDER BY position")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                let position: i64 = row.get(0)?;
                let blob: Vec<u8> = row.get(1)?;
                Ok((position, blob))
            })
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut vectors = Vec::new();
        for row in rows {
            let (position, blob) = row.map_err(|e| DomainError::Database(e.to_string()))?;
            let vector = Self::deserialize_vector(&blob).ok_or_else(|| {
                DomainError::Load(format!(
                    "Vector at position {position} has a truncated blob ({} bytes)",
                    blob.len()
                ))
            })?;
            vectors.push(vector);
        }
        Ok(vectors)
    }

    fn load_ids(&self) -> Result<Vec<String>, DomainError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT image_id FROM vectors ORDER BY position")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(ids)
    }
}

impl MetadataSource for SqliteIndexRepo {
    fn load_entries(&self) -> Result<Vec<CatalogEntry>, DomainError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT product_id, brand, series, model, year, image, source_url
                 FROM products ORDER BY position",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let entries = stmt
            .query_map([], |row| {
                let product_id: Option<i64> = row.get(0)?;
                Ok(CatalogEntry {
                    id: product_id.and_then(|id| u64::try_from(id).ok()),
                    brand: row.get(1)?,
                    series: row.get(2)?,
                    model: row.get(3)?,
                    year: row.get(4)?,
                    image: row.get(5)?,
                    source_url: row.get(6)?,
                })
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(entries)
    }
}

impl IndexRepository for SqliteIndexRepo {
    fn replace_all(
        &self,
        store: &VectorStore,
        entries: &[CatalogEntry],
    ) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(format!("Failed to begin import: {e}")))?;

        tx.execute_batch("DELETE FROM vectors; DELETE FROM products;")
            .map_err(|e| DomainError::Database(format!("Failed to clear snapshot: {e}")))?;
        {
            let mut insert = tx
                .prepare("INSERT INTO vectors (position, image_id, vector) VALUES (?1, ?2, ?3)")
                .map_err(|e| DomainError::Database(e.to_string()))?;
            for (index, vector) in store.iter() {
                let id = store.id(index).unwrap_or_default();
                insert
                    .execute(params![index as i64, id, Self::serialize_vector(vector.as_slice())])
                    .map_err(|e| {
                        DomainError::Database(format!("Failed to store vector {id}: {e}"))
                    })?;
            }

            let mut insert = tx
                .prepare(
                    "INSERT INTO products
                        (position, product_id, brand, series, model, year, image, source_url)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )
                .map_err(|e| DomainError::Database(e.to_string()))?;
            for (position, entry) in entries.iter().enumerate() {
                insert
                    .execute(params![
                        position as i64,
                        entry.id.map(|id| id as i64),
                        entry.brand,
                        entry.series,
                        entry.model,
                        entry.year,
                        entry.image,
                        entry.source_url,
                    ])
                    .map_err(|e| {
                        let image = &entry.image;
                        DomainError::Database(format!("Failed to store product {image}: {e}"))
                    })?;
            }
        }
        tx.commit()
            .map_err(|e| DomainError::Database(format!("Failed to commit import: {e}")))
    }
}
