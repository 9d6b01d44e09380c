//! Test corpus: named payloads sent to the prediction endpoint

use crate::error::{AppError, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Built-in payloads: two fabricated and two genuine news statements
const BUILTIN_CASES: &[(&str, &str)] = &[
    (
        "fake_news_1",
        "Scientists confirm the earth is flat and NASA has been lying to us for decades",
    ),
    (
        "fake_news_2",
        "Miracle cure discovered: drinking bleach cures all diseases including cancer",
    ),
    (
        "real_news_1",
        "The stock market experienced volatility today as investors reacted to new economic data",
    ),
    (
        "real_news_2",
        "Researchers publish new findings on climate change in peer-reviewed journal",
    ),
];

/// A named, fixed text payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Identifier, also used as the CSV file stem
    pub name: String,
    /// Text sent as `{"message": ...}`
    pub message: String,
}

impl TestCase {
    /// Create a new test case
    pub fn new<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// First `max_chars` characters of the message followed by an ellipsis
    pub fn preview(&self, max_chars: usize) -> String {
        let head: String = self.message.chars().take(max_chars).collect();
        format!("{}...", head)
    }

    /// Ensure the name can be used as a file stem
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(AppError::validation("Test case name cannot be empty"));
        }

        if let Some(bad) = self
            .name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(AppError::validation(format!(
                "Test case name '{}' contains unsupported character '{}'",
                self.name, bad
            )));
        }

        Ok(())
    }
}

/// The four built-in test cases, in run order
pub fn default_corpus() -> Vec<TestCase> {
    BUILTIN_CASES
        .iter()
        .map(|(name, message)| TestCase::new(*name, *message))
        .collect()
}

/// Load a corpus from a JSON array of `{"name": ..., "message": ...}` objects
pub fn load_corpus_file(path: &Path) -> Result<Vec<TestCase>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read test cases from {}", path.display()))?;
    parse_corpus(&content)
}

/// Parse and validate a JSON corpus
pub fn parse_corpus(content: &str) -> Result<Vec<TestCase>> {
    let cases: Vec<TestCase> = serde_json::from_str(content)?;

    if cases.is_empty() {
        return Err(AppError::validation("Test case file contains no test cases"));
    }

    let mut seen = HashSet::new();
    for case in &cases {
        case.validate()?;
        if !seen.insert(case.name.as_str()) {
            return Err(AppError::validation(format!(
                "Duplicate test case name '{}'",
                case.name
            )));
        }
    }

    Ok(cases)
}

/// Keep only the cases named in `filter`, preserving corpus order.
/// An empty filter selects everything.
pub fn select_cases(corpus: Vec<TestCase>, filter: &[String]) -> Result<Vec<TestCase>> {
    if filter.is_empty() {
        return Ok(corpus);
    }

    for wanted in filter {
        if !corpus.iter().any(|c| &c.name == wanted) {
            let known: Vec<&str> = corpus.iter().map(|c| c.name.as_str()).collect();
            return Err(AppError::validation(format!(
                "Unknown test case '{}' (available: {})",
                wanted,
                known.join(", ")
            )));
        }
    }

    Ok(corpus
        .into_iter()
        .filter(|c| filter.contains(&c.name))
        .collect())
}
