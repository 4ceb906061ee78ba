use crate::domain::values::similarity::Similarity;
use std::cmp::Ordering;

/// A scored store position, produced per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedHit {
    pub index: usize,
    pub similarity: Similarity,
}

impl RankedHit {
    /// Best first: higher similarity, then lower store index.
    pub fn rank_order(a: &RankedHit, b: &RankedHit) -> Ordering {
        b.similarity
            .cmp(&a.similarity)
            .then_with(|| a.index.cmp(&b.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(index: usize, sim: f64) -> RankedHit {
        RankedHit { index, similarity: Similarity::new(sim).unwrap() }
    }

    #[test]
    fn test_higher_similarity_first() {
        assert_eq!(RankedHit::rank_order(&hit(5, 0.9), &hit(0, 0.1)), Ordering::Less);
    }

    #[test]
    fn test_ties_break_on_index() {
        assert_eq!(RankedHit::rank_order(&hit(1, 0.5), &hit(3, 0.5)), Ordering::Less);
        assert_eq!(RankedHit::rank_order(&hit(3, 0.5), &hit(1, 0.5)), Ordering::Greater);
    }
}
