pub mod analytics;
pub mod api;
pub mod config;
pub mod enrichment;
pub mod storage;
