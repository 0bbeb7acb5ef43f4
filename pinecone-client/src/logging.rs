//! Request/response logging around any `Transport`.
//!
//! The secret header keeps its place in the logged header set but its value is
//! replaced with [`REDACTED`]. Bodies are rendered once, pretty-printed when
//! they are JSON, and the response is handed back with the same buffer.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pinecone_core::utils::to_pretty_json;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use tracing::{error, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Wire name of the authentication header (header names are case-insensitive).
pub const API_KEY_HEADER: &str = "api-key";

/// Value logged in place of the API key.
pub const REDACTED: &str = "SNIP";

pub struct RequestLog<'a> {
    pub method: &'a Method,
    pub url: &'a Url,
    pub headers: &'a HeaderMap,
    pub body: &'a str,
}

pub struct ResponseLog<'a> {
    pub url: &'a Url,
    pub status: StatusCode,
    pub elapsed: Duration,
    pub headers: &'a HeaderMap,
    pub body: &'a str,
}

/// Receives one record per request and one per outcome. Injected into
/// `LoggingTransport`; the library never installs a global logger.
pub trait ExchangeLogger: Send + Sync + fmt::Debug {
    fn request(&self, entry: &RequestLog<'_>);

    fn response(&self, entry: &ResponseLog<'_>);

    fn failure(&self, url: &Url, elapsed: Duration, error: &ClientError) {
        let _ = (url, elapsed, error);
    }
}

/// Emits `tracing` events under the `pinecone_client::http` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingExchangeLogger;

impl ExchangeLogger for TracingExchangeLogger {
    fn request(&self, entry: &RequestLog<'_>) {
        info!(target: "pinecone_client::http", method = %entry.method, url = %entry.url, headers = ?entry.headers, "Sending request");
        if !entry.body.is_empty() {
            info!(target: "pinecone_client::http", "Request body:\n------\n{}\n------", entry.body);
        }
    }

    fn response(&self, entry: &ResponseLog<'_>) {
        let elapsed_ms = entry.elapsed.as_millis() as u64;
        if entry.status.is_success() {
            info!(target: "pinecone_client::http", url = %entry.url, status = %entry.status, elapsed_ms, headers = ?entry.headers, "Received response");
        } else {
            warn!(target: "pinecone_client::http", url = %entry.url, status = %entry.status, elapsed_ms, headers = ?entry.headers, "Received error response");
        }
        info!(target: "pinecone_client::http", "Response body:\n------\n{}\n------", entry.body);
    }

    fn failure(&self, url: &Url, elapsed: Duration, error: &ClientError) {
        error!(target: "pinecone_client::http", url = %url, elapsed_ms = elapsed.as_millis() as u64, error = %error, "Request failed");
    }
}

/// Copies the header set, overwriting (not removing) the API key value.
pub fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut redacted = headers.clone();
    if redacted.contains_key(API_KEY_HEADER) {
        redacted.insert(HeaderName::from_static(API_KEY_HEADER), HeaderValue::from_static(REDACTED));
    }
    redacted
}

/// Logging interceptor. Elapsed time is observational only.
#[derive(Debug, Clone)]
pub struct LoggingTransport<T> {
    inner: T,
    logger: Arc<dyn ExchangeLogger>,
}

impl<T: Transport> LoggingTransport<T> {
    pub fn new(inner: T, logger: Arc<dyn ExchangeLogger>) -> Self {
        LoggingTransport { inner, logger }
    }

    pub fn with_tracing(inner: T) -> Self {
        Self::new(inner, Arc::new(TracingExchangeLogger))
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for LoggingTransport<T> {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let started = Instant::now();
        let url = request.url.clone();

        let headers = redact_headers(&request.headers);
        let body = request.body.as_deref().map(to_pretty_json).unwrap_or_default();
        self.logger.request(&RequestLog {
            method: &request.method,
            url: &url,
            headers: &headers,
            body: &body,
        });

        match self.inner.execute(request).await {
            Ok(response) => {
                let headers = redact_headers(response.headers());
                let body = to_pretty_json(response.body());
                self.logger.response(&ResponseLog {
                    url: response.url(),
                    status: response.status(),
                    elapsed: started.elapsed(),
                    headers: &headers,
                    body: &body,
                });
                Ok(response)
            }
            Err(err) => {
                self.logger.failure(&url, started.elapsed(), &err);
                Err(err)
            }
        }
    }
}
