pub mod assembler;
pub mod catalog;
pub mod ranker;
pub mod vector_store;
