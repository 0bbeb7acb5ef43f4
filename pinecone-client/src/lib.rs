// Declare modules to be part of the library crate

pub mod config;
pub mod error;
pub mod index_client;
pub mod logging;
pub mod request;
pub mod transport;
pub mod vector_client;

pub use config::{ApiKey, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use index_client::IndexAdminClient;
pub use logging::{ExchangeLogger, LoggingTransport, TracingExchangeLogger};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use vector_client::VectorClient;

// The request/response model lives in the core crate.
pub use pinecone_core;
