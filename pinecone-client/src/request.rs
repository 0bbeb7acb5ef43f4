//! Builds authenticated, JSON-shaped requests.

use pinecone_core::{FetchRequest, PineconeError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;

use crate::error::ClientResult;
use crate::logging::API_KEY_HEADER;
use crate::transport::ApiRequest;

const APPLICATION_JSON: &str = "application/json";

/// Builds a request carrying `Accept`/`Content-Type: application/json` and the
/// API key. A present body is serialized to JSON; a bodyless POST gets an
/// empty body, which the service requires.
pub fn build_request<B>(method: Method, url: &str, api_key: &str, body: Option<&B>) -> ClientResult<ApiRequest>
where
    B: Serialize + ?Sized,
{
    let url = parse_url(url)?;
    let headers = default_headers(api_key)?;
    let body = match body {
        Some(body) => Some(serde_json::to_vec(body).map_err(PineconeError::from)?),
        None if method == Method::POST => Some(Vec::new()),
        None => None,
    };

    Ok(ApiRequest { method, url, headers, body })
}

/// A request without a JSON body.
pub fn build_empty(method: Method, url: &str, api_key: &str) -> ClientResult<ApiRequest> {
    build_request::<()>(method, url, api_key, None)
}

/// `GET {url}?ids=a,b&namespace=ns`
pub fn build_fetch(url: &str, api_key: &str, fetch: &FetchRequest) -> ClientResult<ApiRequest> {
    let mut request = build_empty(Method::GET, url, api_key)?;
    request.url.query_pairs_mut().extend_pairs(fetch.query_pairs());
    Ok(request)
}

fn parse_url(url: &str) -> ClientResult<Url> {
    Url::parse(url).map_err(|e| PineconeError::RequestConstruction(format!("invalid URL '{}': {}", url, e)).into())
}

fn default_headers(api_key: &str) -> ClientResult<HeaderMap> {
    let mut key = HeaderValue::from_str(api_key)
        .map_err(|_| PineconeError::RequestConstruction("API key is not a valid header value".to_string()))?;
    // Keeps the key out of `Debug` output of the header map.
    key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
    Ok(headers)
}
