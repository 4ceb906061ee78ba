use crate::domain::entities::catalog_entry::UNKNOWN;
use crate::domain::entities::query_result::QueryResult;
use crate::domain::services::catalog::{Catalog, Lookup};
use crate::domain::services::vector_store::VectorStore;
use crate::domain::values::ranked_hit::RankedHit;

/// Joins ranked hits to catalog metadata. Rank is the 1-based position in
/// `hits`, so ties keep the ranker's order. Catalog misses get `"Unknown"`
/// brand and model rather than failing the query.
pub fn assemble(hits: &[RankedHit], store: &VectorStore, catalog: &Catalog) -> Vec<QueryResult> {
    hits.iter()
        .enumerate()
        .map(|(pos, hit)| {
            let image = store.id(hit.index).unwrap_or_default().to_string();
            let (brand, model) = match catalog.find(&image) {
                Lookup::Found(entry) => (entry.brand.clone(), entry.display_model()),
                Lookup::NotFound => {
                    tracing::debug!(
                        image = %image,
                        index = hit.index,
                        "No catalog entry for image"
                    );
                    (UNKNOWN.to_string(), UNKNOWN.to_string())
                }
            };
            QueryResult {
                rank: pos + 1,
                similarity: hit.similarity.value(),
                brand,
                model,
                image,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog_entry::CatalogEntry;
    use crate::domain::values::similarity::Similarity;

    fn hit(index: usize, sim: f64) -> RankedHit {
        RankedHit { index, similarity: Similarity::new(sim).unwrap() }
    }

    fn fixtures() -> (VectorStore, Catalog) {
        let store = VectorStore::from_parts(
            vec![vec![1.0], vec![2.0], vec![3.0]],
            vec!["00001.jpg".into(), "00002.jpg".into(), "00009.jpg".into()],
        )
        .unwrap();
        let catalog = Catalog::from_entries(vec![
            CatalogEntry::new("Fender", "Stratocaster", "Player", "data/raw/00001.jpg"),
            CatalogEntry::new("Gibson", "Les Paul", "Standard", "data/raw/00002.jpg"),
        ]);
        (store, catalog)
    }

    #[test]
    fn test_ranks_follow_input_order() {
        let (store, catalog) = fixtures();
        let results = assemble(&[hit(1, 0.9), hit(0, 0.9)], &store, &catalog);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[0].brand, "Gibson");
        assert_eq!(results[0].model, "Les Paul Standard");
        assert_eq!(results[0].image, "00002.jpg");
        assert_eq!(results[1].rank, 2);
        assert_eq!(results[1].brand, "Fender");
    }

    #[test]
    fn test_missing_entry_gets_defaults() {
        let (store, catalog) = fixtures();
        let results = assemble(&[hit(2, 0.4)], &store, &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].brand, "Unknown");
        assert_eq!(results[0].model, "Unknown");
        assert_eq!(results[0].image, "00009.jpg");
        assert_eq!(results[0].similarity, 0.4);
    }

    #[test]
    fn test_empty_hits() {
        let (store, catalog) = fixtures();
        assert!(assemble(&[], &store, &catalog).is_empty());
    }
}
