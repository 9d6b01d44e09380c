//! Colored formatter implementation with terminal color support

use super::formatter::{rule, OutputFormatter, MESSAGE_PREVIEW_CHARS};
use crate::models::{BenchConfig, BenchReport, TestCase, TestCaseSummary};
use colored::*;
use std::path::Path;

/// Latency classification for color coding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceLevel {
    Excellent,  // < 50ms
    Good,       // 50-100ms
    Fair,       // 100-300ms
    Poor,       // 300-1000ms
    VeryPoor,   // > 1000ms
}

impl PerformanceLevel {
    /// Determine performance level from response time in milliseconds
    pub fn from_response_time(time_ms: f64) -> Self {
        if time_ms < 50.0 {
            Self::Excellent
        } else if time_ms < 100.0 {
            Self::Good
        } else if time_ms < 300.0 {
            Self::Fair
        } else if time_ms < 1000.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Get color for this performance level
    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Poor => Color::Magenta,
            Self::VeryPoor => Color::Red,
        }
    }
}

/// Formatter that decorates the plain layout with ANSI colors
#[derive(Debug, Clone, Default)]
pub struct ColoredFormatter;

impl ColoredFormatter {
    pub fn new() -> Self {
        Self
    }

    fn latency(&self, time_ms: f64) -> ColoredString {
        format!("{:.2} ms", time_ms)
            .color(PerformanceLevel::from_response_time(time_ms).color())
            .bold()
    }

    fn rule(&self) -> ColoredString {
        rule().bright_blue()
    }

    /// Returns true if stdout supports color output
    pub fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(true)
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, config: &BenchConfig, case_count: usize) -> String {
        [
            self.rule().to_string(),
            "API Performance Testing".bold().to_string(),
            self.rule().to_string(),
            format!("API Endpoint: {}", config.endpoint_url.cyan()),
            format!("Number of test cases: {}", case_count.to_string().bold()),
            format!("Requests per test case: {}", config.request_count.to_string().bold()),
            self.rule().to_string(),
        ]
        .join("\n")
    }

    fn format_case_start(&self, case: &TestCase, request_count: u32) -> String {
        format!(
            "\n{} {}\nMessage: {}\nMaking {} requests...",
            "Testing:".bold(),
            case.name.cyan().bold(),
            case.preview(MESSAGE_PREVIEW_CHARS).dimmed(),
            request_count
        )
    }

    fn format_progress(&self, completed: usize, total: usize) -> String {
        format!("  {} {}/{} requests", "Completed".green(), completed, total)
    }

    fn format_case_summary(&self, summary: &TestCaseSummary, csv_path: &Path) -> String {
        let failures = format!("{}/{}", summary.failure_count, summary.request_count());
        let failures = if summary.failure_count == 0 {
            failures.green()
        } else {
            failures.red().bold()
        };

        [
            format!("  Results saved to {}", csv_path.display().to_string().underline()),
            format!("  Average latency: {}", self.latency(summary.avg)),
            format!("  Min latency: {}", self.latency(summary.min)),
            format!("  Max latency: {}", self.latency(summary.max)),
            format!("  Median latency: {}", self.latency(summary.median)),
            format!("  Failed requests: {}", failures),
        ]
        .join("\n")
    }

    fn format_section(&self, title: &str) -> String {
        format!("\n{}\n{}\n{}", self.rule(), title.bold(), self.rule())
    }

    fn format_artifact(&self, description: &str, path: &Path) -> String {
        format!(
            "{} {} saved as '{}'",
            "✓".green(),
            description,
            path.display().to_string().underline()
        )
    }

    fn format_overall(&self, report: &BenchReport) -> String {
        [
            self.format_section("OVERALL SUMMARY"),
            format!(
                "Overall average latency across all test cases: {}",
                self.latency(report.overall_avg_ms)
            ),
            format!(
                "\n{}",
                "All CSV files and plots have been generated successfully!".green().bold()
            ),
            self.rule().to_string(),
        ]
        .join("\n")
    }
}
