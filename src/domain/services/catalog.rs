use crate::domain::entities::catalog_entry::{normalize_path, CatalogEntry};
use crate::domain::error::DomainError;
use crate::domain::ports::metadata_source::MetadataSource;
use std::collections::HashMap;

/// Outcome of a catalog lookup. A miss is an expected result, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a CatalogEntry),
    NotFound,
}

impl<'a> Lookup<'a> {
    pub fn entry(self) -> Option<&'a CatalogEntry> {
        match self {
            Lookup::Found(entry) => Some(entry),
            Lookup::NotFound => None,
        }
    }
}

/// Product metadata keyed by image file name.
///
/// An entry matches an identifier when its reference path ends with it.
/// When several entries match, the first in load order wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    paths: Vec<String>,
    /// Every suffix of every file name, mapped to the first entry ending with it.
    by_suffix: HashMap<String, usize>,
}

impl Catalog {
    pub fn load(source: &dyn MetadataSource) -> Result<Self, DomainError> {
        let catalog = Self::from_entries(source.load_entries()?);
        tracing::info!(entries = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut by_suffix: HashMap<String, usize> = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            let name = entry.file_name();
            if let Some(&first) = by_suffix.get(name) {
                tracing::debug!(
                    file_name = %name,
                    kept = %entries[first].image,
                    shadowed = %entry.image,
                    "Catalog file name already matched by an earlier entry; first entry wins"
                );
            }
            for (start, _) in name.char_indices() {
                by_suffix.entry(name[start..].to_string()).or_insert(pos);
            }
        }
        let paths = entries.iter().map(CatalogEntry::normalized_path).collect();
        Self {
            entries,
            paths,
            by_suffix,
        }
    }

    pub fn find(&self, catalog_id: &str) -> Lookup<'_> {
        let id = normalize_path(catalog_id);
        if id.is_empty() {
            return Lookup::NotFound;
        }
        // Without a separator the id can only be a suffix of the file name.
        let pos = if id.contains('/') {
            self.paths.iter().position(|path| path.ends_with(&id))
        } else {
            self.by_suffix.get(&id).copied()
        };
        pos.map(|pos| Lookup::Found(&self.entries[pos]))
            .unwrap_or(Lookup::NotFound)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            CatalogEntry::new("Fender", "Stratocaster", "Player", "data/raw/00001.jpg"),
            CatalogEntry::new("Gibson", "Les Paul", "Standard", "data/raw/00002.jpg"),
            CatalogEntry::new("Ibanez", "RG", "550", "archive/00001.jpg"),
            CatalogEntry::new("PRS", "SE", "Custom 24", "data/raw/100003.jpg"),
        ])
    }

    #[test]
    fn test_find_by_file_name() {
        let c = catalog();
        let entry = c.find("00002.jpg").entry().unwrap();
        assert_eq!(entry.brand, "Gibson");
    }

    #[test]
    fn test_first_match_wins() {
        let c = catalog();
        assert_eq!(c.find("00001.jpg").entry().unwrap().brand, "Fender");
    }

    #[test]
    fn test_find_by_longer_suffix() {
        let c = catalog();
        assert_eq!(c.find("archive/00001.jpg").entry().unwrap().brand, "Ibanez");
        assert_eq!(c.find("raw/00002.jpg").entry().unwrap().brand, "Gibson");
        assert_eq!(c.find("data/raw/00001.jpg").entry().unwrap().brand, "Fender");
    }

    #[test]
    fn test_any_path_suffix_matches() {
        let c = catalog();
        assert_eq!(c.find("00003.jpg").entry().unwrap().brand, "PRS");
        assert_eq!(c.find("100003.jpg").entry().unwrap().brand, "PRS");
        assert_eq!(c.find("aw/00002.jpg").entry().unwrap().brand, "Gibson");

        let c = Catalog::from_entries(vec![CatalogEntry::new("A", "", "X", "data/raw/img_7.jpg")]);
        assert_eq!(c.find("7.jpg").entry().unwrap().brand, "A");
    }

    #[test]
    fn test_first_suffix_match_in_load_order_wins() {
        let c = Catalog::from_entries(vec![
            CatalogEntry::new("A", "", "X", "data/raw/100001.jpg"),
            CatalogEntry::new("B", "", "Y", "data/raw/00001.jpg"),
        ]);
        assert_eq!(c.find("00001.jpg").entry().unwrap().brand, "A");
        assert_eq!(c.find("raw/00001.jpg").entry().unwrap().brand, "A");
        assert_eq!(c.find("raw/100001.jpg").entry().unwrap().brand, "A");
        assert_eq!(c.find("/00001.jpg").entry().unwrap().brand, "B");
    }

    #[test]
    fn test_missing_id() {
        let c = catalog();
        assert_eq!(c.find("99999.jpg"), Lookup::NotFound);
        assert_eq!(c.find(""), Lookup::NotFound);
    }

    #[test]
    fn test_backslash_ids_are_normalized() {
        let c = catalog();
        assert_eq!(c.find("raw\\00002.jpg").entry().unwrap().brand, "Gibson");
    }
}
