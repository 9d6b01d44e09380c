//! Configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound for requests per test case
pub const MAX_REQUEST_COUNT: u32 = 10_000;

/// Upper bound for the per-request timeout
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Main benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Prediction endpoint that receives every POST
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Number of sequential requests per test case
    #[serde(default = "default_request_count")]
    pub request_count: u32,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Directory receiving the CSV files and images
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// TrueType font used for chart text; discovered on the host when unset
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// Restrict the run to these test case names (empty means all)
    #[serde(default)]
    pub case_filter: Vec<String>,

    /// JSON file replacing the built-in corpus
    #[serde(default)]
    pub cases_file: Option<PathBuf>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            request_count: default_request_count(),
            timeout_seconds: default_timeout_secs(),
            output_dir: default_output_dir(),
            font_path: None,
            case_filter: Vec::new(),
            cases_file: None,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl BenchConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration aimed at a specific endpoint, everything else default
    pub fn for_endpoint<S: Into<String>>(endpoint_url: S) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            ..Self::default()
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.endpoint_url.trim().is_empty() {
            return Err(AppError::config("Endpoint URL cannot be empty"));
        }

        let parsed = url::Url::parse(&self.endpoint_url)
            .map_err(|e| AppError::config(format!("Invalid endpoint URL '{}': {}", self.endpoint_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::config(format!(
                "Endpoint URL must use http or https: {}",
                self.endpoint_url
            )));
        }

        if self.request_count == 0 {
            return Err(AppError::config("Request count must be greater than 0"));
        }

        if self.request_count > MAX_REQUEST_COUNT {
            return Err(AppError::config(format!(
                "Request count cannot exceed {}",
                MAX_REQUEST_COUNT
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} seconds",
                MAX_TIMEOUT_SECONDS
            )));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(AppError::config("Output directory cannot be empty"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge values produced by `lookup` (keyed by environment variable name)
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PREDICT_URL") {
            self.endpoint_url = url.trim().to_string();
        }

        if let Some(count) = lookup("REQUEST_COUNT") {
            self.request_count = count.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid REQUEST_COUNT value '{}': {}", count, e)))?;
        }

        if let Some(timeout) = lookup("TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Some(dir) = lookup("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir.trim());
        }

        if let Some(font) = lookup("CHART_FONT") {
            let font = font.trim();
            if !font.is_empty() {
                self.font_path = Some(PathBuf::from(font));
            }
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_endpoint_url() -> String {
    crate::defaults::DEFAULT_ENDPOINT_URL.to_string()
}

fn default_request_count() -> u32 {
    crate::defaults::DEFAULT_REQUEST_COUNT
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_OUTPUT_DIR)
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
