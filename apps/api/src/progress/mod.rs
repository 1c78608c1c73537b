pub mod handlers;
pub mod ingest;
pub mod merge;
pub mod models;
