use std::sync::Arc;

use pinecone_core::parser::{
    parse_fetch_all, parse_fetch_response, parse_index_stats, parse_query_response, parse_upsert_response,
};
use pinecone_core::{
    DataPlaneOp, DeleteRequest, EndpointResolver, FetchRequest, FetchResponse, IndexStats, QueryRequest,
    QueryResponse, UpsertRequest, UpsertResponse,
};
use reqwest::Method;
use tracing::{debug, info, warn};

use crate::config::{ApiKey, ClientConfig};
use crate::error::ClientResult;
use crate::logging::{ExchangeLogger, LoggingTransport};
use crate::request::{build_empty, build_fetch, build_request};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Data-plane client: stats, query, fetch, upsert and delete against one
/// project's index hosts.
#[derive(Debug, Clone)]
pub struct VectorClient {
    resolver: EndpointResolver,
    api_key: ApiKey,
    transport: Arc<dyn Transport>,
}

impl VectorClient {
    /// reqwest transport wrapped in the logging interceptor, logging through `tracing`.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let transport = LoggingTransport::with_tracing(HttpTransport::new(config.timeout)?);
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Same as [`VectorClient::new`] with a caller-supplied logger.
    pub fn with_logger(config: &ClientConfig, logger: Arc<dyn ExchangeLogger>) -> ClientResult<Self> {
        let transport = LoggingTransport::new(HttpTransport::new(config.timeout)?, logger);
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        VectorClient {
            resolver: config.resolver(),
            api_key: config.api_key.clone(),
            transport,
        }
    }

    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.transport.execute(request).await
    }

    pub async fn describe_index_stats(&self, index_name: &str) -> ClientResult<IndexStats> {
        debug!(index_name, "Describing index stats");
        let url = self.resolver.data_plane(index_name, DataPlaneOp::DescribeIndexStats);
        let response = self.send(build_empty(Method::POST, &url, self.api_key.expose())?).await?;
        Ok(parse_index_stats(response.body())?)
    }

    /// Nearest neighbours of `request.vector()`. A response without `matches`
    /// (an error envelope, for instance) yields an empty list.
    pub async fn query(&self, request: &QueryRequest) -> ClientResult<Vec<QueryResponse>> {
        debug!(index_name = request.index_name(), namespace = request.namespace(), top_k = request.top_k(), "Querying index");
        let url = self.resolver.data_plane(request.index_name(), DataPlaneOp::Query);
        let response = self
            .send(build_request(Method::POST, &url, self.api_key.expose(), Some(request))?)
            .await?;
        let matches = parse_query_response(response.body())?;
        debug!(count = matches.len(), "Query returned matches");
        Ok(matches)
    }

    /// First vector of the response in document order, `None` when nothing matched.
    pub async fn fetch(&self, request: &FetchRequest) -> ClientResult<Option<FetchResponse>> {
        let response = self.send_fetch(request).await?;
        Ok(parse_fetch_response(response.body())?)
    }

    /// Every vector the service returned for `request.ids()`.
    pub async fn fetch_all(&self, request: &FetchRequest) -> ClientResult<Vec<FetchResponse>> {
        let response = self.send_fetch(request).await?;
        Ok(parse_fetch_all(response.body())?)
    }

    async fn send_fetch(&self, request: &FetchRequest) -> ClientResult<ApiResponse> {
        debug!(index_name = request.index_name(), ids = %request.ids_as_string(), "Fetching vectors");
        let url = self.resolver.data_plane(request.index_name(), DataPlaneOp::Fetch);
        self.send(build_fetch(&url, self.api_key.expose(), request)?).await
    }

    pub async fn upsert(&self, request: &UpsertRequest) -> ClientResult<UpsertResponse> {
        info!(index_name = request.index_name(), namespace = request.namespace(), count = request.vectors().len(), "Upserting vectors");
        let url = self.resolver.data_plane(request.index_name(), DataPlaneOp::Upsert);
        let response = self
            .send(build_request(Method::POST, &url, self.api_key.expose(), Some(request))?)
            .await?;
        let upserted = parse_upsert_response(response.body())?;
        debug!(upserted = upserted.upserted_count, "Upsert acknowledged");
        Ok(upserted)
    }

    /// Returns the raw response body (`{}` on success).
    pub async fn delete(&self, request: &DeleteRequest) -> ClientResult<String> {
        if request.delete_all() {
            warn!(index_name = request.index_name(), "delete_all is not sent to the service; only the listed ids are deleted");
        }
        info!(index_name = request.index_name(), namespace = request.namespace(), count = request.ids().len(), "Deleting vectors");
        let url = self.resolver.data_plane(request.index_name(), DataPlaneOp::Delete);
        let response = self
            .send(build_request(Method::POST, &url, self.api_key.expose(), Some(request))?)
            .await?;
        Ok(response.text())
    }
}
