//! Console formatter trait and the plain-text implementation

use crate::models::{BenchConfig, BenchReport, TestCase, TestCaseSummary};
use std::path::Path;

/// Width of the `=` rules framing each section
pub const RULE_WIDTH: usize = 70;

/// Characters of the payload shown before a test case runs
pub const MESSAGE_PREVIEW_CHARS: usize = 50;

/// Renders the human-readable console output of a run
pub trait OutputFormatter: Send + Sync {
    /// Opening banner with endpoint and run size
    fn format_banner(&self, config: &BenchConfig, case_count: usize) -> String;

    /// Announcement printed before a test case starts
    fn format_case_start(&self, case: &TestCase, request_count: u32) -> String;

    /// Progress line after `completed` requests
    fn format_progress(&self, completed: usize, total: usize) -> String;

    /// Statistics printed after a test case finished
    fn format_case_summary(&self, summary: &TestCaseSummary, csv_path: &Path) -> String;

    /// Framed section title
    fn format_section(&self, title: &str) -> String;

    /// Line announcing a written image
    fn format_artifact(&self, description: &str, path: &Path) -> String;

    /// Overall summary and closing banner
    fn format_overall(&self, report: &BenchReport) -> String;
}

/// Plain text formatter for logs and non-terminal output
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, config: &BenchConfig, case_count: usize) -> String {
        [
            rule(),
            "API Performance Testing".to_string(),
            rule(),
            format!("API Endpoint: {}", config.endpoint_url),
            format!("Number of test cases: {}", case_count),
            format!("Requests per test case: {}", config.request_count),
            rule(),
        ]
        .join("\n")
    }

    fn format_case_start(&self, case: &TestCase, request_count: u32) -> String {
        format!(
            "\nTesting: {}\nMessage: {}\nMaking {} requests...",
            case.name,
            case.preview(MESSAGE_PREVIEW_CHARS),
            request_count
        )
    }

    fn format_progress(&self, completed: usize, total: usize) -> String {
        format!("  Completed {}/{} requests", completed, total)
    }

    fn format_case_summary(&self, summary: &TestCaseSummary, csv_path: &Path) -> String {
        [
            format!("  Results saved to {}", csv_path.display()),
            format!("  Average latency: {:.2} ms", summary.avg),
            format!("  Min latency: {:.2} ms", summary.min),
            format!("  Max latency: {:.2} ms", summary.max),
            format!("  Median latency: {:.2} ms", summary.median),
            format!(
                "  Failed requests: {}/{}",
                summary.failure_count,
                summary.request_count()
            ),
        ]
        .join("\n")
    }

    fn format_section(&self, title: &str) -> String {
        format!("\n{}\n{}\n{}", rule(), title, rule())
    }

    fn format_artifact(&self, description: &str, path: &Path) -> String {
        format!("{} saved as '{}'", description, path.display())
    }

    fn format_overall(&self, report: &BenchReport) -> String {
        [
            self.format_section("OVERALL SUMMARY"),
            format!(
                "Overall average latency across all test cases: {:.2} ms",
                report.overall_avg_ms
            ),
            "\nAll CSV files and plots have been generated successfully!".to_string(),
            rule(),
        ]
        .join("\n")
    }
}
