use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Cosine similarity in `[-1, 1]`. Totally ordered, never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Similarity(f64);

impl Similarity {
    pub const ZERO: Similarity = Similarity(0.0);

    pub fn new(value: f64) -> Result<Self, String> {
        if value.is_nan() || !(-1.0..=1.0).contains(&value) {
            return Err(format!(
                "Similarity must be between -1.0 and 1.0, got {value}"
            ));
        }
        Ok(Similarity(value))
    }

    /// Clamps rounding overshoot back into range; NaN maps to zero.
    /// Negative zero is folded into zero so it ties with other zero scores.
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Similarity::ZERO
        } else {
            Similarity(value.clamp(-1.0, 1.0) + 0.0)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Eq for Similarity {}

impl PartialOrd for Similarity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Similarity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl Default for Similarity {
    fn default() -> Self {
        Similarity::ZERO
    }
}
