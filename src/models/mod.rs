//! Data models and structures for the prediction latency benchmark

pub mod config;
pub mod corpus;
pub mod result;
pub mod summary;

// Re-export main model types
pub use config::BenchConfig;
pub use corpus::TestCase;
pub use result::{RequestResult, MISSING_LABEL};
pub use summary::{BenchReport, TestCaseSummary};
