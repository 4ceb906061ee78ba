use serde::{Serialize, Serializer};

/// Decimal places kept when a similarity leaves the process.
pub const SIMILARITY_DECIMALS: i32 = 3;

/// One rank-numbered search hit joined with catalog metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub rank: usize,
    #[serde(serialize_with = "serialize_rounded")]
    pub similarity: f64,
    pub brand: String,
    pub model: String,
    pub image: String,
}

pub fn round_similarity(value: f64) -> f64 {
    let scale = 10f64.powi(SIMILARITY_DECIMALS);
    (value * scale).round() / scale
}

fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_similarity(*value))
}
