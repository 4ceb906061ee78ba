pub mod catalog_entry;
pub mod feature_vector;
pub mod query_result;
