pub mod catalog_source;
pub mod record_source;
pub mod vector_source;

use crate::domain::error::DomainError;
use serde::de::DeserializeOwned;
use std::path::Path;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Load(format!("Cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| DomainError::Parse(format!("Invalid JSON in {}: {e}", path.display())))
}
