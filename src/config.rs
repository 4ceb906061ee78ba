use crate::domain::error::DomainError;
use crate::domain::services::ranker::DEFAULT_PARALLEL_THRESHOLD;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Where the index is loaded from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `embeddings/embeddings.json` + `embeddings/image_ids.json` + `products.json`
    Json,
    /// A single per-record `embeddings/embeddings.json`
    Records,
    /// SQLite snapshot written by `import`
    Sqlite,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(SourceKind::Json),
            "records" => Ok(SourceKind::Records),
            "sqlite" => Ok(SourceKind::Sqlite),
            _ => Err(format!("Unknown source: {s} (expected json, records or sqlite)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    Http,
    None,
}

impl FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(ExtractorKind::Http),
            "none" | "" => Ok(ExtractorKind::None),
            _ => Err(format!("Unknown extractor: {s} (expected http or none)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub source: SourceKind,
    pub db_path: PathBuf,
    pub top_k: usize,
    pub extractor: ExtractorKind,
    pub extractor_url: String,
    pub extractor_timeout: Duration,
    pub parallel_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = PathBuf::from("./data");
        Self {
            db_path: data_dir.join("lookalike.db"),
            data_dir,
            source: SourceKind::Json,
            top_k: 3,
            extractor: ExtractorKind::None,
            extractor_url: "http://127.0.0.1:8001".into(),
            extractor_timeout: Duration::from_secs(30),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let defaults = Settings::default();
        let data_dir = lookup("LOOKALIKE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let db_path = lookup("LOOKALIKE_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("lookalike.db"));

        Ok(Self {
            source: parse_var(&lookup, "LOOKALIKE_SOURCE")?.unwrap_or(defaults.source),
            top_k: parse_var(&lookup, "LOOKALIKE_TOP_K")?.unwrap_or(defaults.top_k),
            extractor: parse_var(&lookup, "LOOKALIKE_EXTRACTOR")?.unwrap_or(defaults.extractor),
            extractor_url: lookup("LOOKALIKE_EXTRACTOR_URL").unwrap_or(defaults.extractor_url),
            extractor_timeout: parse_var(&lookup, "LOOKALIKE_EXTRACTOR_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.extractor_timeout),
            parallel_threshold: parse_var(&lookup, "LOOKALIKE_PARALLEL_THRESHOLD")?
                .unwrap_or(defaults.parallel_threshold),
            data_dir,
            db_path,
        })
    }

    pub fn embeddings_path(&self) -> PathBuf {
        self.data_dir.join("embeddings").join("embeddings.json")
    }

    pub fn image_ids_path(&self) -> PathBuf {
        self.data_dir.join("embeddings").join("image_ids.json")
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join("products.json")
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| DomainError::InvalidInput(format!("{key}={raw}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, DomainError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.top_k, 3);
        assert_eq!(s.source, SourceKind::Json);
        assert_eq!(s.extractor, ExtractorKind::None);
        assert_eq!(s.products_path(), PathBuf::from("./data/products.json"));
        assert_eq!(s.db_path(), Path::new("./data/lookalike.db"));
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("LOOKALIKE_DATA_DIR", "/srv/catalog"),
            ("LOOKALIKE_SOURCE", "sqlite"),
            ("LOOKALIKE_TOP_K", "10"),
            ("LOOKALIKE_EXTRACTOR", "HTTP"),
        ])
        .unwrap();
        assert_eq!(s.source, SourceKind::Sqlite);
        assert_eq!(s.top_k, 10);
        assert_eq!(s.extractor, ExtractorKind::Http);
        assert_eq!(s.db_path(), Path::new("/srv/catalog/lookalike.db"));
        assert_eq!(
            s.image_ids_path(),
            PathBuf::from("/srv/catalog/embeddings/image_ids.json")
        );
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let err = settings(&[("LOOKALIKE_TOP_K", "many")]).unwrap_err();
        assert!(err.to_string().contains("LOOKALIKE_TOP_K"));
    }
}
