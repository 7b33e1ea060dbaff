//! Upload transport: send the accepted file to the classification service.
//!
//! One multipart `POST` per call, carrying a single `file` part. There is no
//! retry, timeout or cancellation; the caller's busy flag keeps at most one
//! request in flight.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{error, info};

use super::gate::CandidateFile;
use crate::config::Config;
use crate::telemetry;
use crate::types::{ClassificationRecord, parse_records};
use crate::{Result, SegscopeError};

/// Multipart field name the service reads the upload from.
pub const FILE_FIELD: &str = "file";

/// Fallback text when an error body is JSON but carries no usable message.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Failed to process file";

/// Text used when a success response is not a list of records.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Malformed response from classification service";

/// Something that turns a transactions CSV into per-customer segments.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Name for logging/debugging.
    fn name(&self) -> &str;

    /// Upload `file` and return the service's records.
    async fn classify(&self, file: &CandidateFile) -> Result<Vec<ClassificationRecord>>;
}

/// HTTP client for the classification service.
#[derive(Clone)]
pub struct ClassifierClient {
    http: Client,
    url: String,
}

impl ClassifierClient {
    /// Create a client posting to the configured base URL and endpoint.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_url(config.endpoint_url())
    }

    /// Create a client posting to an explicit URL (for testing with wiremock).
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().build().map_err(|e| {
            SegscopeError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Upload `file` and parse the returned records.
    pub async fn submit(&self, file: &CandidateFile) -> Result<Vec<ClassificationRecord>> {
        let start = Instant::now();
        info!(file = %file.name, size = file.size, url = %self.url, "uploading file");

        let result = self.send(file).await;
        record_upload(start, result.is_ok());

        match &result {
            Ok(records) => info!(file = %file.name, records = records.len(), "file processed"),
            Err(e) => error!(file = %file.name, kind = e.kind(), error = %e, "upload failed"),
        }
        result
    }

    async fn send(&self, file: &CandidateFile) -> Result<Vec<ClassificationRecord>> {
        let bytes = tokio::fs::read(&file.path).await?;
        let mime = if file.media_type.is_empty() {
            "application/octet-stream"
        } else {
            file.media_type.as_str()
        };
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(mime)
            .map_err(|e| SegscopeError::TransportFailure(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SegscopeError::TransportFailure(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SegscopeError::TransportFailure(e.to_string()))?;

        interpret_response(status, &body)
    }
}

#[async_trait]
impl Classifier for ClassifierClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn classify(&self, file: &CandidateFile) -> Result<Vec<ClassificationRecord>> {
        self.submit(file).await
    }
}

/// Map a status code and body to records or a typed error.
pub fn interpret_response(status: u16, body: &str) -> Result<Vec<ClassificationRecord>> {
    if (200..300).contains(&status) {
        return parse_records(body).map_err(|_| SegscopeError::ServerRejected {
            status,
            message: MALFORMED_RESPONSE_MESSAGE.to_string(),
        });
    }

    Err(SegscopeError::ServerRejected {
        status,
        message: rejection_message(status, body),
    })
}

/// Pick the text to show for a non-success response.
///
/// A JSON body's `message`, then `error`, wins. A body that is not JSON
/// falls back to the status table.
pub fn rejection_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| {
                value
                    .get(*key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or(DEFAULT_REJECTION_MESSAGE)
            .to_string(),
        Err(_) => status_message(status),
    }
}

/// Fixed human messages keyed by HTTP status.
pub fn status_message(status: u16) -> String {
    match status {
        400 => "Invalid file format or missing required data".to_string(),
        413 => "File size too large".to_string(),
        422 => "Invalid CSV format or missing required columns".to_string(),
        500 => "Server error occurred while processing the file".to_string(),
        code => format!("Server responded with status: {code}"),
    }
}

fn record_upload(start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(telemetry::UPLOADS_TOTAL, "status" => status).increment(1);
    metrics::histogram!(telemetry::UPLOAD_DURATION_SECONDS).record(start.elapsed().as_secs_f64());
}
