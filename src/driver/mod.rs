//! Per-test-case driver
//!
//! Runs one test case as a strictly sequential loop of requests, writes its
//! CSV file and returns the latency summary. Request failures are recorded and
//! the loop goes on; only CSV and statistics errors abort the case.

use crate::{
    client::PredictionClient,
    defaults::PROGRESS_INTERVAL,
    error::{AppError, Result},
    logging::Logger,
    models::{RequestResult, TestCase, TestCaseSummary},
    output::{csv, OutputFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Everything one driver call produced
#[derive(Debug, Clone)]
pub struct CaseRun {
    pub results: Vec<RequestResult>,
    pub summary: TestCaseSummary,
    pub csv_path: PathBuf,
}

/// Drives the requests of a single test case
pub struct TestCaseDriver<'a> {
    client: &'a dyn PredictionClient,
    formatter: &'a dyn OutputFormatter,
    logger: Logger,
    output_dir: PathBuf,
}

impl<'a> TestCaseDriver<'a> {
    pub fn new<P: Into<PathBuf>>(
        client: &'a dyn PredictionClient,
        formatter: &'a dyn OutputFormatter,
        logger: Logger,
        output_dir: P,
    ) -> Self {
        Self {
            client,
            formatter,
            logger,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Send `request_count` requests for `case`, one after the other
    pub async fn run(&self, case: &TestCase, request_count: u32) -> Result<CaseRun> {
        if request_count == 0 {
            return Err(AppError::validation(format!(
                "Test case '{}' needs at least one request",
                case.name
            )));
        }

        println!("{}", self.formatter.format_case_start(case, request_count));

        let total = request_count as usize;
        let started = Instant::now();
        let mut results = Vec::with_capacity(total);

        for index in 0..total {
            let result = self.client.predict(&case.message).await;

            self.logger
                .debug("Request finished")
                .field("test_case", &case.name)
                .field("request_number", index + 1)
                .request_result(&result)
                .log()
                .await;

            results.push(result);

            let completed = index + 1;
            if should_report_progress(completed, total) {
                println!("{}", self.formatter.format_progress(completed, total));
            }
        }

        let csv_path = csv::results_csv_path(&self.output_dir, &case.name);
        csv::write_results_csv(&csv_path, &results)?;

        let summary = TestCaseSummary::from_results(&case.name, &results)?;
        println!("{}", self.formatter.format_case_summary(&summary, &csv_path));

        self.logger
            .info("Test case completed")
            .summary(&summary)
            .field("elapsed_ms", started.elapsed().as_secs_f64() * 1000.0)
            .field("csv_path", csv_path.display().to_string())
            .log()
            .await;

        if summary.failure_count == summary.request_count() {
            self.logger
                .warn("Every request of this test case failed")
                .field("test_case", &case.name)
                .log()
                .await;
        }

        Ok(CaseRun {
            results,
            summary,
            csv_path,
        })
    }
}

/// Progress is shown every [`PROGRESS_INTERVAL`] requests and once more at the
/// end when the total is not a multiple of it.
pub fn should_report_progress(completed: usize, total: usize) -> bool {
    completed > 0 && (completed % PROGRESS_INTERVAL == 0 || completed == total)
}
