//! Shared reqwest plumbing: client construction and status mapping.

use crate::ProviderError;
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Builds a client. With `timeout_secs = None` the transport default applies.
pub fn build_client(timeout_secs: Option<u64>) -> Result<Client, ProviderError> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| ProviderError::RequestFailed(e.to_string()))
}

pub fn map_transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::RequestFailed(err.to_string())
    }
}

pub fn map_status(status: StatusCode, body: &[u8]) -> ProviderError {
    let body = String::from_utf8_lossy(body).into_owned();
    if status == StatusCode::TOO_MANY_REQUESTS {
        ProviderError::QuotaExceeded(body)
    } else if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::GATEWAY_TIMEOUT {
        ProviderError::Timeout
    } else {
        ProviderError::RequestFailed(format!("status {} body {}", status, body))
    }
}

/// Sends the request and decodes a JSON body, mapping every failure to a `ProviderError`.
pub async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ProviderError> {
    let resp: Response = builder.send().await.map_err(map_transport_error)?;
    debug!(status = %resp.status(), url = %resp.url(), "provider responded");
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.bytes().await.unwrap_or(Bytes::from_static(b""));
        return Err(map_status(status, &body));
    }
    let body = resp.bytes().await.map_err(map_transport_error)?;
    serde_json::from_slice(&body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}
