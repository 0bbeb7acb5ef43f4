pub mod endpoint;
pub mod error;
pub mod metric;
pub mod models;
pub mod parser;
pub mod utils;
pub mod vector;

// Re-export key types for easier use
pub use endpoint::{DataPlaneOp, EndpointResolver};
pub use error::{PineconeError, PineconeResult};
pub use metric::{Metric, PodType};
pub use models::{
    ConfigureIndexRequest, CreateCollectionRequest, CreateIndexRequest, DeleteRequest, FetchRequest,
    FetchResponse, IndexStats, NamespaceStats, QueryRequest, QueryResponse, UpsertRequest, UpsertResponse,
    UpsertVector,
};
pub use vector::{Values, VectorId};
