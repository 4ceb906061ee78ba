//! Exhaustive cosine-similarity ranking.
//!
//! Every stored vector is scored against the query; there is no index and no
//! approximation. Results are ordered by similarity descending with ties
//! broken by ascending store index, which makes the output a pure function of
//! the query and the store.
//!
//! Large stores are scanned in parallel. Each chunk keeps its own best `k`
//! under the same total order, and the merged candidates are re-sorted, so
//! the parallel path returns exactly what the sequential path would.

use crate::domain::entities::feature_vector::FeatureVector;
use crate::domain::error::DomainError;
use crate::domain::services::vector_store::VectorStore;
use crate::domain::values::ranked_hit::RankedHit;
use crate::domain::values::similarity::Similarity;
use rayon::prelude::*;

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Vectors per rayon task.
const CHUNK_SIZE: usize = 1024;

/// Cosine similarity of two equal-length slices.
///
/// Zero norm on either side gives `0.0`. Slices of different length also give
/// `0.0`; callers that care check dimensions first.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    score(dot, norm_a, norm_b).value()
}

/// `dot / sqrt(‖a‖² · ‖b‖²)`. Taking one square root of the product keeps
/// `score(n, n, n) == 1.0` exact.
fn score(dot: f64, squared_norm_a: f64, squared_norm_b: f64) -> Similarity {
    let denom = (squared_norm_a * squared_norm_b).sqrt();
    if denom == 0.0 {
        Similarity::ZERO
    } else {
        Similarity::saturating(dot / denom)
    }
}

fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum()
}

#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    parallel_threshold: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }
}

impl Ranker {
    /// Stores with at least `parallel_threshold` vectors are scanned with rayon.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    pub fn sequential() -> Self {
        Self::new(usize::MAX)
    }

    /// The `min(k, store.size())` best hits, best first.
    pub fn top_k(
        &self,
        query: &FeatureVector,
        store: &VectorStore,
        k: usize,
    ) -> Result<Vec<RankedHit>, DomainError> {
        if query.dimension() != store.dimension() {
            return Err(DomainError::DimensionMismatch {
                expected: store.dimension(),
                actual: query.dimension(),
            });
        }
        let k = k.min(store.size());
        if k == 0 {
            return Ok(vec![]);
        }

        let query_norm = query.squared_norm();
        let q = query.as_slice();

        if store.size() >= self.parallel_threshold {
            let candidates: Vec<RankedHit> = store
                .vectors()
                .par_chunks(CHUNK_SIZE)
                .zip(store.squared_norms().par_chunks(CHUNK_SIZE))
                .enumerate()
                .flat_map_iter(|(chunk, (vectors, norms))| {
                    let offset = chunk * CHUNK_SIZE;
                    let hits = vectors
                        .iter()
                        .zip(norms)
                        .enumerate()
                        .map(|(i, (v, norm))| RankedHit {
                            index: offset + i,
                            similarity: score(dot(q, v.as_slice()), query_norm, *norm),
                        })
                        .collect();
                    select_best(hits, k)
                })
                .collect();
            Ok(select_best(candidates, k))
        } else {
            let hits = store
                .iter()
                .map(|(index, v)| RankedHit {
                    index,
                    similarity: score(dot(q, v.as_slice()), query_norm, store.squared_norm(index)),
                })
                .collect();
            Ok(select_best(hits, k))
        }
    }
}

/// First `k` of `hits` under the rank order, sorted.
fn select_best(mut hits: Vec<RankedHit>, k: usize) -> Vec<RankedHit> {
    if k == 0 {
        return vec![];
    }
    if hits.len() > k {
        hits.select_nth_unstable_by(k - 1, RankedHit::rank_order);
        hits.truncate(k);
    }
    hits.sort_unstable_by(RankedHit::rank_order);
    hits
}
