pub mod ranked_hit;
pub mod similarity;
