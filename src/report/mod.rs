//! Reporting: box-plot chart and summary table images

pub mod boxplot;
pub mod fonts;
pub mod table;

pub use boxplot::{render_boxplot, BOXPLOT_TITLE, BOX_COLORS};
pub use fonts::{ensure_font_registered, FONT_FAMILY};
pub use table::{render_summary_table, SummaryTable, TABLE_HEADER};

use crate::error::{AppError, Result};
use crate::models::{BenchConfig, TestCaseSummary};
use std::path::{Path, PathBuf};

/// File name of the latency distribution chart
pub const BOXPLOT_FILE: &str = "performance_boxplot.png";

/// File name of the summary table image
pub const SUMMARY_TABLE_FILE: &str = "performance_summary.png";

/// Paths of the two rendered images
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifacts {
    pub boxplot: PathBuf,
    pub summary_table: PathBuf,
}

/// Renders both report images into one directory
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    output_dir: PathBuf,
    font_path: Option<PathBuf>,
}

impl ReportRenderer {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            font_path: None,
        }
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            font_path: config.font_path.clone(),
        }
    }

    pub fn boxplot_path(&self) -> PathBuf {
        self.output_dir.join(BOXPLOT_FILE)
    }

    pub fn summary_table_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_TABLE_FILE)
    }

    /// Write the box plot, then the summary table. A failure on the second
    /// image leaves the first one on disk.
    pub fn render(&self, summaries: &[TestCaseSummary]) -> Result<ReportArtifacts> {
        if summaries.is_empty() {
            return Err(AppError::render("No test case summaries to report"));
        }

        ensure_font_registered(self.font_path.as_deref())?;

        let artifacts = ReportArtifacts {
            boxplot: self.boxplot_path(),
            summary_table: self.summary_table_path(),
        };

        render_boxplot(summaries, &artifacts.boxplot)?;
        render_summary_table(&SummaryTable::from_summaries(summaries), &artifacts.summary_table)?;

        Ok(artifacts)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Map any plotters drawing error into a render error
pub(crate) fn render_err<E: std::fmt::Display>(error: E) -> AppError {
    AppError::render(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let renderer = ReportRenderer::new("reports");
        assert_eq!(renderer.boxplot_path(), PathBuf::from("reports/performance_boxplot.png"));
        assert_eq!(renderer.summary_table_path(), PathBuf::from("reports/performance_summary.png"));
        assert_eq!(renderer.output_dir(), Path::new("reports"));
    }

    #[test]
    fn test_from_config_carries_font() {
        let config = BenchConfig {
            font_path: Some(PathBuf::from("/fonts/x.ttf")),
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        let renderer = ReportRenderer::from_config(&config);
        assert_eq!(renderer.font_path, Some(PathBuf::from("/fonts/x.ttf")));
        assert_eq!(renderer.boxplot_path(), PathBuf::from("out/performance_boxplot.png"));
    }

    #[test]
    fn test_render_without_summaries_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReportRenderer::new(dir.path()).render(&[]).unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }

    #[test]
    fn test_render_writes_both_images_when_a_font_exists() {
        if fonts::discover_font().is_none() {
            eprintln!("skipping image checks: no TrueType font on this host");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let summaries = vec![
            TestCaseSummary::from_latencies("fake_news_1", vec![10.0, 12.0, 30.0, 11.0]).unwrap(),
            TestCaseSummary::from_latencies("real_news_1", vec![20.0, 22.0, 21.0]).unwrap(),
        ];

        let artifacts = ReportRenderer::new(dir.path()).render(&summaries).unwrap();
        assert!(artifacts.boxplot.is_file());
        assert!(artifacts.summary_table.is_file());
        assert!(std::fs::metadata(&artifacts.boxplot).unwrap().len() > 0);
    }
}
