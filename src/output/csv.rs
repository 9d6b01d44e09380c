//! Per-test-case CSV result files

use crate::{
    error::{ErrorContext, Result},
    models::RequestResult,
};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// Column order of every results file
pub const CSV_HEADER: [&str; 6] = [
    "request_number",
    "timestamp",
    "latency_ms",
    "success",
    "prediction",
    "error",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    request_number: usize,
    timestamp: String,
    latency_ms: String,
    success: &'static str,
    prediction: &'a str,
    error: &'a str,
}

impl<'a> CsvRow<'a> {
    fn new(request_number: usize, result: &'a RequestResult) -> Self {
        Self {
            request_number,
            timestamp: result.timestamp_iso(),
            latency_ms: result.latency_display(),
            success: success_text(result.success),
            prediction: result.prediction.as_deref().unwrap_or(""),
            error: result.error.as_deref().unwrap_or(""),
        }
    }
}

/// Capitalized boolean, as the result files have always carried it
fn success_text(success: bool) -> &'static str {
    if success {
        "True"
    } else {
        "False"
    }
}

/// `<output_dir>/<test_case_name>_results.csv`
pub fn results_csv_path(output_dir: &Path, test_case_name: &str) -> PathBuf {
    output_dir.join(format!("{}_results.csv", test_case_name))
}

/// Write one header row and one row per result, numbered from 1
pub fn write_results<W: io::Write>(writer: W, results: &[RequestResult]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for (index, result) in results.iter().enumerate() {
        writer.serialize(CsvRow::new(index + 1, result))?;
    }
    writer.flush()?;

    Ok(())
}

/// Create (or truncate) `path` and write the results into it
pub fn write_results_csv(path: &Path, results: &[RequestResult]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_results(io::BufWriter::new(file), results)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_results() -> Vec<RequestResult> {
        vec![
            RequestResult::success(Duration::from_micros(12_345), "real".to_string()),
            RequestResult::http_failure(Duration::from_millis(7), 500),
            RequestResult::transport_failure(Duration::from_millis(10_000), "Request timed out after 10s, retry later", None),
        ]
    }

    fn read_back(bytes: &[u8]) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes)
            .records()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let mut buffer = Vec::new();
        write_results(&mut buffer, &sample_results()).unwrap();
        let records = read_back(&buffer);

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].iter().collect::<Vec<_>>(), CSV_HEADER);

        assert_eq!(&records[1][0], "1");
        assert_eq!(&records[1][2], "12.35");
        assert_eq!(&records[1][3], "True");
        assert_eq!(&records[1][4], "real");
        assert_eq!(&records[1][5], "");

        assert_eq!(&records[2][0], "2");
        assert_eq!(&records[2][3], "False");
        assert_eq!(&records[2][4], "");
        assert_eq!(&records[2][5], "Status 500");

        assert_eq!(&records[3][2], "10000.00");
        assert_eq!(&records[3][5], "Request timed out after 10s, retry later");
    }

    #[test]
    fn test_empty_results_still_have_header() {
        let mut buffer = Vec::new();
        write_results(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "request_number,timestamp,latency_ms,success,prediction,error\n"
        );
    }

    #[test]
    fn test_results_csv_path() {
        assert_eq!(
            results_csv_path(Path::new("out"), "fake_news_1"),
            PathBuf::from("out/fake_news_1_results.csv")
        );
    }

    #[test]
    fn test_write_results_csv_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x_results.csv");
        let err = write_results_csv(&path, &sample_results()).unwrap_err();
        assert!(err.to_string().contains("Failed to create"));
    }
}
