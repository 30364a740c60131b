use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::TransportError;

const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl RestRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: None,
        }
    }

    /// Builds a request with a JSON body. A body that cannot be encoded never
    /// reaches the wire and is reported like any other transport failure.
    pub fn with_json<B: Serialize + ?Sized>(
        method: HttpMethod,
        path: impl Into<String>,
        body: &B,
    ) -> std::result::Result<Self, TransportError> {
        let body = serde_json::to_value(body)
            .map_err(|e| TransportError::new(format!("failed to encode request body: {e}")))?;
        Ok(Self {
            method,
            path: path.into(),
            body: Some(body),
        })
    }
}

/// A received response. An empty body is `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    pub status: u16,
    pub body: Value,
    /// The status line arrived but the body could not be read to the end.
    pub truncated: bool,
}

impl RestResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            truncated: false,
        }
    }

    pub fn truncated(status: u16) -> Self {
        Self {
            status,
            body: Value::Null,
            truncated: true,
        }
    }
}

#[async_trait]
pub trait RestClient: Send + Sync {
    fn service_url(&self) -> &str;
    async fn send(&self, request: RestRequest) -> std::result::Result<RestResponse, TransportError>;
}

pub async fn send_json<B: Serialize + ?Sized>(
    client: &dyn RestClient,
    method: HttpMethod,
    path: impl Into<String>,
    body: &B,
) -> std::result::Result<RestResponse, TransportError> {
    let request = RestRequest::with_json(method, path, body)?;
    client.send(request).await
}

pub struct HttpRestClient {
    http: Client,
    service_url: String,
}

impl HttpRestClient {
    pub fn new(service_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self {
            http,
            service_url: service_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RestClient for HttpRestClient {
    fn service_url(&self) -> &str {
        &self.service_url
    }

    async fn send(&self, request: RestRequest) -> std::result::Result<RestResponse, TransportError> {
        let url = format!("{}{API_PREFIX}{}", self.service_url, request.path);
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Put => self.http.put(&url),
            HttpMethod::Patch => self.http.patch(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(path = %request.path, status, error = %err, "transport: response body read failed");
                return Ok(RestResponse::truncated(status));
            }
        };
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                debug!(path = %request.path, status, error = %err, "transport: non-json response body");
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        debug!(
            method = ?request.method,
            path = %request.path,
            status,
            "transport: round trip complete"
        );
        Ok(RestResponse::new(status, body))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
