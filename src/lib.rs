//! Prediction Latency Bench
//!
//! Measures the latency and correctness of an HTTP prediction endpoint by
//! sending fixed payloads one request at a time, writing a CSV per test case
//! and rendering a box plot and a summary table.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod report;
pub mod stats;

// Re-export commonly used types
pub use client::{HttpPredictionClient, PredictionClient};
pub use error::{AppError, Result};
pub use models::{BenchConfig, BenchReport, RequestResult, TestCase, TestCaseSummary};
pub use output::{ColoredFormatter, OutputFormatter, OutputFormatterFactory, PlainFormatter};
pub use stats::{BoxPlotStats, LatencyStats};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_ENDPOINT_URL: &str =
        "http://pra5ece444-env.eba-nwnz2nih.ca-central-1.elasticbeanstalk.com/predict";
    pub const DEFAULT_REQUEST_COUNT: u32 = 100;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_OUTPUT_DIR: &str = ".";
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// A progress line is printed after this many requests
    pub const PROGRESS_INTERVAL: usize = 10;
}
