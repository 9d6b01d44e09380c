//! Main application orchestration and execution

use crate::{
    client::{HttpPredictionClient, PredictionClient},
    config::display_config_summary,
    driver::TestCaseDriver,
    error::{ErrorContext, Result},
    logging::Logger,
    models::{
        corpus::{default_corpus, load_corpus_file, select_cases},
        BenchConfig, BenchReport, TestCase, TestCaseSummary,
    },
    output::{OutputFormatter, OutputFormatterFactory},
    report::{ReportRenderer, SummaryTable},
};

/// Runs every selected test case, then renders the report
pub struct App {
    config: BenchConfig,
    logger: Logger,
    formatter: Box<dyn OutputFormatter>,
}

impl App {
    /// Create a new application instance from a validated configuration
    pub fn new(config: BenchConfig) -> Self {
        let logger = Logger::with_config("app", &config);
        let formatter = OutputFormatterFactory::create_formatter(config.enable_color);
        Self {
            config,
            logger,
            formatter,
        }
    }

    /// Replace the console formatter
    pub fn with_formatter(mut self, formatter: Box<dyn OutputFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run against the configured HTTP endpoint
    pub async fn run(&self) -> Result<BenchReport> {
        let client = HttpPredictionClient::from_config(&self.config)?
            .with_logger(self.logger.named("client"));
        self.run_with_client(&client).await
    }

    /// Run with any prediction client
    pub async fn run_with_client(&self, client: &dyn PredictionClient) -> Result<BenchReport> {
        let session_id = self.logger.start_session().await;
        self.logger.add_context_field("endpoint", client.endpoint()).await;

        if self.config.debug {
            println!("Configuration Summary:\n{}\n", display_config_summary(&self.config));
        }

        let cases = load_cases(&self.config)?;
        std::fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.config.output_dir.display())
        })?;

        self.logger
            .info("Benchmark started")
            .field("session_id", &session_id)
            .field("cases", cases.len())
            .field("requests_per_case", self.config.request_count)
            .log()
            .await;

        println!("{}", self.formatter.format_banner(&self.config, cases.len()));

        let driver = TestCaseDriver::new(
            client,
            self.formatter.as_ref(),
            self.logger.named("driver"),
            &self.config.output_dir,
        );

        let mut summaries: Vec<TestCaseSummary> = Vec::with_capacity(cases.len());
        let mut artifacts = Vec::with_capacity(cases.len() + 2);
        for case in &cases {
            let run = driver.run(case, self.config.request_count).await?;
            artifacts.push(run.csv_path);
            summaries.push(run.summary);
        }

        println!("{}", self.formatter.format_section("Creating visualizations..."));
        let rendered = ReportRenderer::from_config(&self.config).render(&summaries);
        let images = match rendered {
            Ok(images) => images,
            Err(e) => {
                self.logger.error("Report rendering failed").error_info(&e).log().await;
                return Err(e);
            }
        };
        println!("\n{}", self.formatter.format_artifact("Boxplot", &images.boxplot));
        println!("{}", self.formatter.format_artifact("Summary table", &images.summary_table));
        artifacts.push(images.boxplot);
        artifacts.push(images.summary_table);

        if self.config.verbose {
            println!("\n{}", SummaryTable::from_summaries(&summaries).to_text());
        }

        let report = BenchReport::new(summaries, artifacts);
        println!("{}", self.formatter.format_overall(&report));

        self.logger
            .info("Benchmark finished")
            .field("overall_avg_ms", report.overall_avg_ms)
            .field("total_requests", report.total_requests())
            .field("total_failures", report.total_failures())
            .log()
            .await;

        Ok(report)
    }
}

/// Built-in corpus or the configured cases file, narrowed by the case filter
pub fn load_cases(config: &BenchConfig) -> Result<Vec<TestCase>> {
    let corpus = match &config.cases_file {
        Some(path) => load_corpus_file(path)?,
        None => default_corpus(),
    };
    select_cases(corpus, &config.case_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::output::PlainFormatter;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, dir: &std::path::Path) -> BenchConfig {
        BenchConfig {
            request_count: 3,
            timeout_seconds: 5,
            output_dir: dir.to_path_buf(),
            enable_color: false,
            ..BenchConfig::for_endpoint(format!("{}/predict", server.uri()))
        }
    }

    #[test]
    fn test_load_cases_defaults_to_builtin_corpus() {
        let cases = load_cases(&BenchConfig::default()).unwrap();
        let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["fake_news_1", "fake_news_2", "real_news_1", "real_news_2"]);
    }

    #[test]
    fn test_load_cases_from_file_with_filter() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cases.json");
        std::fs::write(
            &file,
            r#"[{"name": "a", "message": "first"}, {"name": "b", "message": "second"}]"#,
        )
        .unwrap();

        let config = BenchConfig {
            cases_file: Some(file),
            case_filter: vec!["b".to_string()],
            ..BenchConfig::default()
        };
        let cases = load_cases(&config).unwrap();
        assert_eq!(cases, vec![TestCase::new("b", "second")]);
    }

    #[test]
    fn test_unknown_case_filter_fails() {
        let config = BenchConfig {
            case_filter: vec!["nope".to_string()],
            ..BenchConfig::default()
        };
        assert!(matches!(load_cases(&config), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_run_writes_one_csv_per_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"label": "fake"})))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig {
            case_filter: vec!["fake_news_1".to_string(), "real_news_2".to_string()],
            ..config_for(&server, dir.path())
        };
        let app = App::new(config).with_formatter(Box::new(PlainFormatter::new()));

        let font_available = crate::report::fonts::discover_font().is_some();
        match app.run().await {
            Ok(report) => {
                assert_eq!(report.summaries.len(), 2);
                assert_eq!(report.total_requests(), 6);
                assert_eq!(report.total_failures(), 0);
                assert_eq!(report.artifacts.len(), 4);
                assert!(dir.path().join("performance_boxplot.png").is_file());
                assert!(dir.path().join("performance_summary.png").is_file());
            }
            Err(AppError::Render(message)) if !font_available => {
                eprintln!("skipping image checks: no TrueType font on this host ({})", message);
            }
            Err(other) => panic!("unexpected error: {}", other),
        }

        assert!(dir.path().join("fake_news_1_results.csv").is_file());
        assert!(dir.path().join("real_news_2_results.csv").is_file());
        assert!(!dir.path().join("fake_news_2_results.csv").exists());
        assert_eq!(server.received_requests().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_run_posts_each_case_message() {
        let server = MockServer::start().await;
        let case = default_corpus().remove(2);
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({"message": case.message})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"label": "real"})))
            .expect(3)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig {
            case_filter: vec![case.name.clone()],
            ..config_for(&server, dir.path())
        };
        let app = App::new(config).with_formatter(Box::new(PlainFormatter::new()));
        let _ = app.run().await;

        let csv = std::fs::read_to_string(dir.path().join("real_news_1_results.csv")).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.lines().skip(1).all(|line| line.contains(",True,real,")));
    }

    #[tokio::test]
    async fn test_creates_missing_output_dir() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("out");
        let config = BenchConfig {
            case_filter: vec!["fake_news_2".to_string()],
            ..config_for(&server, &nested)
        };
        let app = App::new(config).with_formatter(Box::new(PlainFormatter::new()));
        let _ = app.run().await;

        let csv = std::fs::read_to_string(nested.join("fake_news_2_results.csv")).unwrap();
        assert!(csv.lines().skip(1).all(|line| line.ends_with(",False,,Status 500")));
    }
}
