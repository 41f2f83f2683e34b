pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod discovery;
pub mod gitinfo;
pub mod manifest;
pub mod metrics;
pub mod pipeline;
pub mod snapshot;
pub mod types;

pub use aggregate::{aggregate, Aggregation};
pub use analyzer::{FileOutline, ParsedFile, SourceAnalyzer};
pub use config::Config;
pub use pipeline::AnalysisPipeline;
pub use snapshot::SNAPSHOT_VERSION;
pub use types::*;
