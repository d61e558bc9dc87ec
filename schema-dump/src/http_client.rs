use std::time::Duration;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use crate::{Result, SchemaDumpError};

/// Settings shared by every outbound call.
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    /// Applied to each request when set. Requests wait indefinitely otherwise.
    pub request_timeout: Option<Duration>,
}

pub(crate) fn build_http_client(options: &ServiceOptions) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut builder = Client::builder()
        .user_agent(concat!("schema-dump/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers);

    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|source| SchemaDumpError::HttpError {
        action: "create http client",
        source,
    })
}

/// Checks the status of `response` and decodes its body as `T`.
pub(crate) async fn read_json_response<T: DeserializeOwned>(response: Response, action: &'static str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(SchemaDumpError::UnexpectedStatus { action, status });
    }

    let body = response
        .text()
        .await
        .map_err(|source| SchemaDumpError::HttpError { action, source })?;

    debug!(action, bytes = body.len(), "Received response");

    decode_json(&body, action)
}

pub(crate) fn decode_json<T: DeserializeOwned>(body: &str, action: &'static str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| SchemaDumpError::DecodeError { action, source })
}
