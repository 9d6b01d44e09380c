//! Outcome of a single prediction request

use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Duration;

/// Prediction recorded when a 200 response carries no `label` field
pub const MISSING_LABEL: &str = "N/A";

/// One request attempt. Built once by the request runner and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestResult {
    /// True only for status 200 with a JSON object body
    pub success: bool,

    /// Wall-clock round trip (or time until failure) in milliseconds
    pub latency_ms: f64,

    /// Predicted label for successful requests
    pub prediction: Option<String>,

    /// Failure description for unsuccessful requests
    pub error: Option<String>,

    /// HTTP status when a response was received
    pub status_code: Option<u16>,

    /// When the response or failure was observed
    pub timestamp: DateTime<Local>,
}

impl RequestResult {
    /// Status 200 with a parsed prediction
    pub fn success(latency: Duration, prediction: String) -> Self {
        Self {
            success: true,
            latency_ms: duration_ms(latency),
            prediction: Some(prediction),
            error: None,
            status_code: Some(200),
            timestamp: Local::now(),
        }
    }

    /// Any status other than 200
    pub fn http_failure(latency: Duration, status_code: u16) -> Self {
        Self {
            success: false,
            latency_ms: duration_ms(latency),
            prediction: None,
            error: Some(format!("Status {}", status_code)),
            status_code: Some(status_code),
            timestamp: Local::now(),
        }
    }

    /// Timeouts, connection errors and malformed bodies
    pub fn transport_failure<S: Into<String>>(
        latency: Duration,
        error: S,
        status_code: Option<u16>,
    ) -> Self {
        let mut error = error.into();
        if error.is_empty() {
            error = "Unknown transport error".to_string();
        }

        Self {
            success: false,
            latency_ms: duration_ms(latency),
            prediction: None,
            error: Some(error),
            status_code,
            timestamp: Local::now(),
        }
    }

    /// ISO-8601 local timestamp with microseconds
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }

    /// Latency formatted with two decimals
    pub fn latency_display(&self) -> String {
        format!("{:.2}", self.latency_ms)
    }
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
