//! Defines the data structures used for API request and response bodies.
//!
//! Requests are built once (constructor plus `with_*` methods) and then only
//! read; the clients take them by reference.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::metric::{Metric, PodType};
use crate::utils::{json_text, opt_json_text};
use crate::vector::{dedup_ids, Values, VectorId};

/// Number of matches returned by a query unless the caller asks otherwise.
pub const DEFAULT_TOP_K: u32 = 10;

// --- Data plane requests ---

/// Body of `POST /query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    index_name: String,
    namespace: String,
    include_values: bool,
    include_metadata: bool,
    #[serde(rename = "top_k")]
    top_k: u32,
    vector: Values,
}

impl QueryRequest {
    pub fn new(index_name: impl Into<String>, namespace: impl Into<String>, vector: Values) -> Self {
        QueryRequest {
            index_name: index_name.into(),
            namespace: namespace.into(),
            include_values: false,
            include_metadata: false,
            top_k: DEFAULT_TOP_K,
            vector,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_include_values(mut self, include_values: bool) -> Self {
        self.include_values = include_values;
        self
    }

    pub fn with_include_metadata(mut self, include_metadata: bool) -> Self {
        self.include_metadata = include_metadata;
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    pub fn include_values(&self) -> bool {
        self.include_values
    }

    pub fn include_metadata(&self) -> bool {
        self.include_metadata
    }
}

/// A single vector to insert or overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertVector {
    id: VectorId,
    values: Values,
    /// Opaque JSON text, sent as an embedded object. Empty means no metadata.
    #[serde(with = "json_text", default, skip_serializing_if = "String::is_empty")]
    metadata: String,
}

impl UpsertVector {
    pub fn new(id: impl Into<VectorId>, values: Values) -> Self {
        UpsertVector {
            id: id.into(),
            values,
            metadata: String::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }
}

/// Body of `POST /vectors/upsert`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertRequest {
    index_name: String,
    namespace: String,
    vectors: Vec<UpsertVector>,
}

impl UpsertRequest {
    pub fn new(index_name: impl Into<String>, namespace: impl Into<String>, vectors: Vec<UpsertVector>) -> Self {
        UpsertRequest {
            index_name: index_name.into(),
            namespace: namespace.into(),
            vectors,
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn vectors(&self) -> &[UpsertVector] {
        &self.vectors
    }
}

/// Parameters of `GET /vectors/fetch`. Sent as a query string, never as a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    index_name: String,
    namespace: String,
    ids: Vec<VectorId>,
}

impl FetchRequest {
    /// Duplicate ids collapse; the first occurrence keeps its position.
    pub fn new<I, S>(index_name: impl Into<String>, namespace: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<VectorId>,
    {
        FetchRequest {
            index_name: index_name.into(),
            namespace: namespace.into(),
            ids: dedup_ids(ids),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn ids(&self) -> &[VectorId] {
        &self.ids
    }

    /// Ids joined with `,` for the `ids` query parameter.
    pub fn ids_as_string(&self) -> String {
        self.ids.join(",")
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [("ids", self.ids_as_string()), ("namespace", self.namespace.clone())]
    }
}

/// Body of `POST /vectors/delete`.
///
/// Only `namespace` and `ids` reach the wire. `delete_all` is kept on the
/// model but never serialized: the starter tier rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRequest {
    #[serde(skip)]
    index_name: String,
    namespace: String,
    ids: Vec<VectorId>,
    #[serde(skip)]
    delete_all: bool,
}

impl DeleteRequest {
    pub fn new<I, S>(index_name: impl Into<String>, namespace: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<VectorId>,
    {
        DeleteRequest {
            index_name: index_name.into(),
            namespace: namespace.into(),
            ids: dedup_ids(ids),
            delete_all: false,
        }
    }

    pub fn with_delete_all(mut self, delete_all: bool) -> Self {
        self.delete_all = delete_all;
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn ids(&self) -> &[VectorId] {
        &self.ids
    }

    pub fn delete_all(&self) -> bool {
        self.delete_all
    }
}

// --- Control plane requests ---

/// Body of `POST /databases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexRequest {
    name: String,
    metric: Metric,
    dimension: u32,
    replicas: u32,
    pods: u32,
    pod_type: PodType,
    #[serde(with = "opt_json_text", default, skip_serializing_if = "Option::is_none")]
    metadata_config: Option<String>,
}

impl CreateIndexRequest {
    /// One cosine `p1.x1` pod with one replica unless overridden.
    pub fn new(name: impl Into<String>, dimension: u32) -> Self {
        CreateIndexRequest {
            name: name.into(),
            metric: Metric::default(),
            dimension,
            replicas: 1,
            pods: 1,
            pod_type: PodType::default(),
            metadata_config: None,
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_pods(mut self, pods: u32) -> Self {
        self.pods = pods;
        self
    }

    pub fn with_pod_type(mut self, pod_type: PodType) -> Self {
        self.pod_type = pod_type;
        self
    }

    /// JSON text such as `{"indexed":["genre"]}`.
    pub fn with_metadata_config(mut self, metadata_config: impl Into<String>) -> Self {
        self.metadata_config = Some(metadata_config.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    pub fn replicas(&self) -> u32 {
        self.replicas
    }

    pub fn pods(&self) -> u32 {
        self.pods
    }

    pub fn pod_type(&self) -> PodType {
        self.pod_type
    }

    pub fn metadata_config(&self) -> Option<&str> {
        self.metadata_config.as_deref()
    }
}

/// Body of `PATCH /databases/{name}`. Unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureIndexRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    replicas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pod_type: Option<PodType>,
}

impl ConfigureIndexRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replicas = Some(replicas);
        self
    }

    pub fn with_pod_type(mut self, pod_type: PodType) -> Self {
        self.pod_type = Some(pod_type);
        self
    }

    pub fn replicas(&self) -> Option<u32> {
        self.replicas
    }

    pub fn pod_type(&self) -> Option<PodType> {
        self.pod_type
    }
}

/// Body of `POST /collections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    name: String,
    source: String,
}

impl CreateCollectionRequest {
    /// `source` is the name of the index to snapshot.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        CreateCollectionRequest {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

// --- Response Bodies ---

/// One entry of the `matches` array of a query response.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub id: Uuid,
    pub score: f64,
    /// Empty unless the query asked for values.
    pub values: Values,
    /// Opaque JSON text.
    pub metadata: Option<String>,
}

/// One vector of a fetch response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub id: VectorId,
    pub values: Values,
    pub namespace: String,
    /// Opaque JSON text.
    pub metadata: Option<String>,
}

/// Response body of `POST /vectors/upsert`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct UpsertResponse {
    #[serde(rename = "upsertedCount")]
    pub upserted_count: u64,
}

/// Per-namespace entry of the index statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceStats {
    pub vector_count: u64,
}

/// Response body of `POST /describe_index_stats`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceStats>,
    pub dimension: u32,
    #[serde(default)]
    pub index_fullness: f64,
    pub total_vector_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_query_request_wire_fields() {
        let request = QueryRequest::new("idx1", "ns1", vec![0.94, 0.69, 0.23])
            .with_top_k(3)
            .with_include_values(true)
            .with_include_metadata(true);
        let body: Value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "indexName": "idx1",
                "namespace": "ns1",
                "includeValues": true,
                "includeMetadata": true,
                "top_k": 3,
                "vector": [0.94, 0.69, 0.23],
            })
        );
    }

    #[test]
    fn test_query_request_defaults() {
        let request = QueryRequest::new("idx1", "", vec![1.0]);
        assert_eq!(request.top_k(), DEFAULT_TOP_K);
        assert!(!request.include_values());
        assert!(!request.include_metadata());
    }

    #[test]
    fn test_upsert_request_round_trip() {
        let request = UpsertRequest::new(
            "idx1",
            "ns1",
            vec![
                UpsertVector::new("a", vec![0.1, 0.2]).with_metadata("{}"),
                UpsertVector::new("b", vec![0.3, 0.4]).with_metadata(r#"{"page":"460","source":"tmp.pdf"}"#),
            ],
        );
        let text = serde_json::to_string(&request).unwrap();
        let parsed: UpsertRequest = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, request);
        assert_eq!(parsed.vectors()[0].id(), "a");
        assert_eq!(parsed.vectors()[0].values(), &[0.1, 0.2]);
        assert_eq!(parsed.vectors()[0].metadata(), "{}");
        assert_eq!(parsed.vectors()[1].id(), "b");
    }

    #[test]
    fn test_upsert_vector_metadata_is_embedded() {
        let vector = UpsertVector::new("a", vec![1.0]).with_metadata(r#"{"genre":"drama"}"#);
        let body = serde_json::to_value(&vector).unwrap();
        assert_eq!(body, json!({"id": "a", "values": [1.0], "metadata": {"genre": "drama"}}));

        let bare = serde_json::to_value(UpsertVector::new("b", vec![2.0])).unwrap();
        assert_eq!(bare, json!({"id": "b", "values": [2.0]}));
    }

    #[test]
    fn test_upsert_vector_invalid_metadata_fails_to_serialize() {
        let request = UpsertRequest::new("idx1", "", vec![UpsertVector::new("a", vec![1.0]).with_metadata("not json")]);
        assert!(serde_json::to_string(&request).is_err());
    }

    #[test]
    fn test_fetch_request_query_pairs() {
        let request = FetchRequest::new("idx1", "ns1", ["id1", "id2", "id1"]);
        assert_eq!(request.ids(), &["id1".to_string(), "id2".to_string()]);
        assert_eq!(request.ids_as_string(), "id1,id2");
        let pairs = request.query_pairs();
        assert_eq!(pairs[0], ("ids", "id1,id2".to_string()));
        assert_eq!(pairs[1], ("namespace", "ns1".to_string()));
    }

    #[test]
    fn test_delete_request_omits_delete_all_and_index() {
        let request = DeleteRequest::new("idx1", "ns1", vec!["a".to_string()]).with_delete_all(true);
        assert!(request.delete_all());
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"namespace": "ns1", "ids": ["a"]}));
    }

    #[test]
    fn test_create_index_request_body() {
        let request = CreateIndexRequest::new("docs", 1536)
            .with_metric(Metric::Dotproduct)
            .with_pod_type(PodType::S1X2)
            .with_replicas(2)
            .with_metadata_config(r#"{"indexed":["genre"]}"#);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "docs",
                "metric": "dotproduct",
                "dimension": 1536,
                "replicas": 2,
                "pods": 1,
                "pod_type": "s1.x2",
                "metadata_config": {"indexed": ["genre"]},
            })
        );

        let plain = serde_json::to_value(CreateIndexRequest::new("docs", 8)).unwrap();
        assert!(plain.get("metadata_config").is_none());
        assert_eq!(plain["pod_type"], "p1.x1");
        assert_eq!(plain["metric"], "cosine");
    }

    #[test]
    fn test_configure_index_request_skips_unset() {
        let body = serde_json::to_value(ConfigureIndexRequest::new().with_replicas(3)).unwrap();
        assert_eq!(body, json!({"replicas": 3}));
        let body = serde_json::to_value(
            ConfigureIndexRequest::new().with_replicas(1).with_pod_type(PodType::P1X2),
        )
        .unwrap();
        assert_eq!(body, json!({"replicas": 1, "pod_type": "p1.x2"}));
    }

    #[test]
    fn test_create_collection_request_body() {
        let body = serde_json::to_value(CreateCollectionRequest::new("snap", "docs")).unwrap();
        assert_eq!(body, json!({"name": "snap", "source": "docs"}));
    }

    #[test]
    fn test_upsert_response_and_stats() {
        let upsert: UpsertResponse = serde_json::from_str(r#"{"upsertedCount":2}"#).unwrap();
        assert_eq!(upsert.upserted_count, 2);

        let stats: IndexStats = serde_json::from_str(
            r#"{"namespaces":{"":{"vectorCount":5},"ns1":{"vectorCount":3}},"dimension":3,"indexFullness":0.1,"totalVectorCount":8}"#,
        )
        .unwrap();
        assert_eq!(stats.dimension, 3);
        assert_eq!(stats.total_vector_count, 8);
        assert_eq!(stats.namespaces["ns1"].vector_count, 3);
        assert_eq!(stats.namespaces[""].vector_count, 5);
    }

    #[test]
    fn test_stats_and_upsert_require_their_counts() {
        let envelope = r#"{"code":16,"message":"Invalid API Key","details":[]}"#;
        assert!(serde_json::from_str::<UpsertResponse>(envelope).is_err());
        assert!(serde_json::from_str::<IndexStats>(envelope).is_err());
    }
}
