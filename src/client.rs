//! Request runner: one POST per call, timed and classified
//!
//! Every failure mode (non-200 status, transport error, timeout, malformed
//! body) is folded into a [`RequestResult`], so a caller looping over
//! [`PredictionClient::predict`] never sees an error.

#[cfg(test)]
mod integration_tests;

use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::{BenchConfig, RequestResult, MISSING_LABEL},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use std::error::Error as _;
use std::time::{Duration, Instant};

/// Prediction endpoint abstraction for testing
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Send one payload and report what happened
    async fn predict(&self, message: &str) -> RequestResult;

    /// URL requests are sent to
    fn endpoint(&self) -> &str;
}

/// JSON body sent to the endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest<'a> {
    pub message: &'a str,
}

/// reqwest-backed prediction client
pub struct HttpPredictionClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
    logger: Option<Logger>,
}

impl HttpPredictionClient {
    /// Create a client for `endpoint` with a per-request timeout.
    ///
    /// Idle connections are not kept, so every measurement includes
    /// connection setup just like an unpooled one-off request.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| AppError::config(format!("Invalid endpoint URL '{}': {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
            logger: None,
        })
    }

    /// Create a client from the benchmark configuration
    pub fn from_config(config: &BenchConfig) -> Result<Self> {
        Self::new(&config.endpoint_url, config.timeout())
    }

    /// Log every request at debug level
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn send(&self, message: &str) -> RequestResult {
        let start = Instant::now();

        let response = match self
            .client
            .post(self.endpoint.clone())
            .json(&PredictionRequest { message })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return RequestResult::transport_failure(
                    start.elapsed(),
                    describe_transport_error(&e, self.timeout),
                    None,
                )
            }
        };

        let status = response.status();
        let body = response.bytes().await;
        let latency = start.elapsed();

        if status != StatusCode::OK {
            return RequestResult::http_failure(latency, status.as_u16());
        }

        match body {
            Ok(body) => match extract_prediction(&body) {
                Ok(label) => RequestResult::success(latency, label),
                Err(reason) => RequestResult::transport_failure(latency, reason, Some(status.as_u16())),
            },
            Err(e) => RequestResult::transport_failure(
                latency,
                describe_transport_error(&e, self.timeout),
                Some(status.as_u16()),
            ),
        }
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, message: &str) -> RequestResult {
        let result = self.send(message).await;

        if let Some(logger) = &self.logger {
            logger
                .debug("Prediction request finished")
                .field("endpoint", self.endpoint.as_str())
                .request_result(&result)
                .log()
                .await;
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

/// Pull the `label` field out of a JSON object body.
///
/// A missing or null label yields [`MISSING_LABEL`]; a non-string label is
/// kept as its JSON text.
pub fn extract_prediction(body: &[u8]) -> std::result::Result<String, String> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| format!("Invalid JSON response: {}", e))?;

    let object = value
        .as_object()
        .ok_or_else(|| "Invalid JSON response: expected an object".to_string())?;

    Ok(match object.get("label") {
        None | Some(serde_json::Value::Null) => MISSING_LABEL.to_string(),
        Some(serde_json::Value::String(label)) => label.clone(),
        Some(serde_json::Value::Bool(true)) => "True".to_string(),
        Some(serde_json::Value::Bool(false)) => "False".to_string(),
        Some(other) => other.to_string(),
    })
}

/// Human-readable description of a reqwest failure, including its causes
pub fn describe_transport_error(error: &reqwest::Error, timeout: Duration) -> String {
    let mut description = if error.is_timeout() {
        format!("Request timed out after {}: {}", format_timeout(timeout), error)
    } else if error.is_connect() {
        format!("Connection error: {}", error)
    } else {
        error.to_string()
    };

    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }

    description
}

fn format_timeout(timeout: Duration) -> String {
    if timeout.subsec_millis() == 0 && timeout.as_secs() > 0 {
        format!("{}s", timeout.as_secs())
    } else {
        format!("{}ms", timeout.as_millis())
    }
}
