use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";

/// One product record from the catalog, addressed by the file name of its image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub id: Option<u64>,
    pub brand: String,
    #[serde(default)]
    pub series: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<String>,
    /// Reference path of the product image, e.g. `data/raw/00001.jpg`.
    pub image: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl CatalogEntry {
    pub fn new(brand: &str, series: &str, model: &str, image: &str) -> Self {
        Self {
            id: None,
            brand: brand.to_string(),
            series: series.to_string(),
            model: model.to_string(),
            year: None,
            image: image.to_string(),
            source_url: None,
        }
    }

    /// Series and model joined for display, e.g. "Stratocaster American Pro II".
    pub fn display_model(&self) -> String {
        let series = self.series.trim();
        let model = self.model.trim();
        match (series.is_empty(), model.is_empty()) {
            (true, true) => UNKNOWN.to_string(),
            (true, false) => model.to_string(),
            (false, true) => series.to_string(),
            (false, false) => format!("{series} {model}"),
        }
    }

    /// Reference path with `\` separators normalized to `/`.
    pub fn normalized_path(&self) -> String {
        normalize_path(&self.image)
    }

    /// Last path segment of the reference path; the canonical catalog identifier.
    pub fn file_name(&self) -> &str {
        self.image
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.image)
    }
}

pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
