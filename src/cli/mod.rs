//! Command-line interface

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Sequential latency and correctness benchmark for an HTTP prediction endpoint
#[derive(Parser, Debug, Clone)]
#[command(name = "plb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Prediction endpoint receiving the POST requests
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Requests per test case
    #[arg(short = 'n', long, value_parser = parse_count)]
    pub count: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(short, long, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Directory for the CSV files and images
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run only this test case (can be used multiple times)
    #[arg(long = "case", value_name = "NAME", action = ArgAction::Append)]
    pub cases: Vec<String>,

    /// JSON array of {"name", "message"} objects replacing the built-in cases
    #[arg(long, value_name = "PATH")]
    pub cases_file: Option<PathBuf>,

    /// TrueType font for chart text
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        !self.no_color && crate::output::ColoredFormatter::supports_color()
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Command-line overrides:\n");
        if let Some(ref url) = self.url {
            summary.push_str(&format!("  URL: {}\n", url));
        }
        if let Some(count) = self.count {
            summary.push_str(&format!("  Requests per case: {}\n", count));
        }
        if let Some(timeout) = self.timeout {
            summary.push_str(&format!("  Timeout: {}s\n", timeout));
        }
        if let Some(ref dir) = self.output_dir {
            summary.push_str(&format!("  Output directory: {}\n", dir.display()));
        }
        if !self.cases.is_empty() {
            summary.push_str(&format!("  Cases: {}\n", self.cases.join(", ")));
        }
        if let Some(ref file) = self.cases_file {
            summary.push_str(&format!("  Cases file: {}\n", file.display()));
        }
        if let Some(ref font) = self.font {
            summary.push_str(&format!("  Font: {}\n", font.display()));
        }
        summary.push_str(&format!("  Colored output: {}\n", !self.no_color));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

fn parse_count(s: &str) -> Result<u32, String> {
    let count = parse_positive(s, "count")?;
    let max = u64::from(crate::models::config::MAX_REQUEST_COUNT);
    if count > max {
        return Err(format!("Request count cannot exceed {}", max));
    }
    Ok(count as u32)
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    let secs = parse_positive(s, "duration")?;
    if secs > crate::models::config::MAX_TIMEOUT_SECONDS {
        return Err(format!(
            "Duration cannot exceed {} seconds",
            crate::models::config::MAX_TIMEOUT_SECONDS
        ));
    }
    Ok(secs)
}

fn parse_positive(s: &str, what: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid {}: {}", what, s));
    }

    match s.parse::<u64>() {
        Ok(0) => Err(format!("{} must be greater than 0", capitalize(what))),
        Ok(value) => Ok(value),
        Err(_) => Err(format!("Invalid {}: {}", what, s)),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
