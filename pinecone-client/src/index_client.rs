use std::sync::Arc;

use pinecone_core::{ConfigureIndexRequest, CreateCollectionRequest, CreateIndexRequest, EndpointResolver};
use reqwest::Method;
use serde::Serialize;
use tracing::info;

use crate::config::{ApiKey, ClientConfig};
use crate::error::ClientResult;
use crate::logging::{ExchangeLogger, LoggingTransport};
use crate::request::{build_empty, build_request};
use crate::transport::{HttpTransport, Transport};

/// Control-plane client for indexes and collections.
///
/// Every method returns the raw response body. The controller answers some
/// calls with plain text and reports failures through its own error
/// envelope, neither of which is interpreted here.
#[derive(Debug, Clone)]
pub struct IndexAdminClient {
    resolver: EndpointResolver,
    api_key: ApiKey,
    transport: Arc<dyn Transport>,
}

impl IndexAdminClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let transport = LoggingTransport::with_tracing(HttpTransport::new(config.timeout)?);
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_logger(config: &ClientConfig, logger: Arc<dyn ExchangeLogger>) -> ClientResult<Self> {
        let transport = LoggingTransport::new(HttpTransport::new(config.timeout)?, logger);
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        IndexAdminClient {
            resolver: config.resolver(),
            api_key: config.api_key.clone(),
            transport,
        }
    }

    async fn call(&self, method: Method, url: String) -> ClientResult<String> {
        let request = build_empty(method, &url, self.api_key.expose())?;
        Ok(self.transport.execute(request).await?.text())
    }

    async fn call_with_body<B: Serialize + Sync>(&self, method: Method, url: String, body: &B) -> ClientResult<String> {
        let request = build_request(method, &url, self.api_key.expose(), Some(body))?;
        Ok(self.transport.execute(request).await?.text())
    }

    pub async fn list_indexes(&self) -> ClientResult<String> {
        self.call(Method::GET, self.resolver.indexes(None)).await
    }

    pub async fn create_index(&self, request: &CreateIndexRequest) -> ClientResult<String> {
        info!(index_name = request.name(), dimension = request.dimension(), pod_type = %request.pod_type(), "Creating index");
        self.call_with_body(Method::POST, self.resolver.indexes(None), request).await
    }

    pub async fn delete_index(&self, index_name: &str) -> ClientResult<String> {
        info!(index_name, "Deleting index");
        self.call(Method::DELETE, self.resolver.indexes(Some(index_name))).await
    }

    pub async fn describe_index(&self, index_name: &str) -> ClientResult<String> {
        self.call(Method::GET, self.resolver.indexes(Some(index_name))).await
    }

    /// Quota and pod-type errors come back as the controller's own message.
    pub async fn configure_index(&self, index_name: &str, request: &ConfigureIndexRequest) -> ClientResult<String> {
        info!(index_name, replicas = ?request.replicas(), pod_type = ?request.pod_type(), "Configuring index");
        self.call_with_body(Method::PATCH, self.resolver.indexes(Some(index_name)), request).await
    }

    pub async fn list_collections(&self) -> ClientResult<String> {
        self.call(Method::GET, self.resolver.collections(None)).await
    }

    pub async fn create_collection(&self, request: &CreateCollectionRequest) -> ClientResult<String> {
        info!(collection = request.name(), source = request.source(), "Creating collection");
        self.call_with_body(Method::POST, self.resolver.collections(None), request).await
    }

    pub async fn describe_collection(&self, name: &str) -> ClientResult<String> {
        self.call(Method::GET, self.resolver.collections(Some(name))).await
    }

    pub async fn delete_collection(&self, name: &str) -> ClientResult<String> {
        info!(collection = name, "Deleting collection");
        self.call(Method::DELETE, self.resolver.collections(Some(name))).await
    }
}
