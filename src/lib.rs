pub mod config;
pub mod coverage;
pub mod ingest;
pub mod output;
pub mod taxonomy;
pub mod types;
pub mod venn;
