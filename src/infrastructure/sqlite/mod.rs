pub mod index_repo;
pub mod migrations;
