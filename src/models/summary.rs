//! Per-test-case and whole-run summaries

use crate::error::Result;
use crate::models::result::RequestResult;
use crate::stats::{mean_of, LatencyStats};
use serde::Serialize;
use std::path::PathBuf;

/// Aggregated latencies for one test case. Failed and timed-out requests are
/// part of the series; `failure_count` says how many.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCaseSummary {
    pub name: String,
    /// Latencies in execution order, one per request
    pub latencies: Vec<f64>,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub success_count: usize,
    pub failure_count: usize,
}

impl TestCaseSummary {
    /// Summarize the results of one driver run
    pub fn from_results(name: &str, results: &[RequestResult]) -> Result<Self> {
        let latencies: Vec<f64> = results.iter().map(|r| r.latency_ms).collect();
        let stats = LatencyStats::from_latencies(&latencies)?;
        let success_count = results.iter().filter(|r| r.success).count();

        Ok(Self {
            name: name.to_string(),
            failure_count: latencies.len() - success_count,
            latencies,
            avg: stats.avg,
            min: stats.min,
            max: stats.max,
            median: stats.median,
            success_count,
        })
    }

    /// Summarize a bare latency series, counting every sample as a success
    pub fn from_latencies(name: &str, latencies: Vec<f64>) -> Result<Self> {
        let stats = LatencyStats::from_latencies(&latencies)?;
        Ok(Self {
            name: name.to_string(),
            success_count: latencies.len(),
            failure_count: 0,
            latencies,
            avg: stats.avg,
            min: stats.min,
            max: stats.max,
            median: stats.median,
        })
    }

    pub fn request_count(&self) -> usize {
        self.latencies.len()
    }

    /// Name as shown in charts: "fake_news_1" becomes "Fake News 1"
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// Replace underscores with spaces and title-case every alphabetic run
pub fn display_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;

    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub summaries: Vec<TestCaseSummary>,
    /// Mean of the per-case averages
    pub overall_avg_ms: f64,
    /// Files written, in creation order
    pub artifacts: Vec<PathBuf>,
}

impl BenchReport {
    pub fn new(summaries: Vec<TestCaseSummary>, artifacts: Vec<PathBuf>) -> Self {
        let averages: Vec<f64> = summaries.iter().map(|s| s.avg).collect();
        Self {
            overall_avg_ms: mean_of(&averages),
            summaries,
            artifacts,
        }
    }

    pub fn total_requests(&self) -> usize {
        self.summaries.iter().map(|s| s.request_count()).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.summaries.iter().map(|s| s.failure_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("fake_news_1"), "Fake News 1");
        assert_eq!(display_name("real_NEWS_2"), "Real News 2");
        assert_eq!(display_name("case-b2b"), "Case-B2B");
    }

    #[test]
    fn test_from_results_counts_failures_in_series() {
        let results = vec![
            RequestResult::success(Duration::from_millis(10), "real".to_string()),
            RequestResult::http_failure(Duration::from_millis(30), 500),
            RequestResult::success(Duration::from_millis(20), "fake".to_string()),
        ];
        let summary = TestCaseSummary::from_results("real_news_1", &results).unwrap();

        assert_eq!(summary.request_count(), 3);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count, 1);
        assert!((summary.avg - 20.0).abs() < 1e-9);
        assert!((summary.max - 30.0).abs() < 1e-9);
        assert!((summary.median - 20.0).abs() < 1e-9);
        assert_eq!(summary.display_name(), "Real News 1");
    }

    #[test]
    fn test_from_results_requires_samples() {
        assert!(TestCaseSummary::from_results("x", &[]).is_err());
    }

    #[test]
    fn test_report_overall_average() {
        let a = TestCaseSummary::from_latencies("a", vec![10.0, 20.0]).unwrap();
        let b = TestCaseSummary::from_latencies("b", vec![40.0]).unwrap();
        let report = BenchReport::new(vec![a, b], Vec::new());

        assert_eq!(report.overall_avg_ms, 27.5);
        assert_eq!(report.total_requests(), 3);
        assert_eq!(report.total_failures(), 0);
    }
}
