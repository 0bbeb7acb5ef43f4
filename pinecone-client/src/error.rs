use pinecone_core::PineconeError;
use thiserror::Error;

/// Client-side error types.
///
/// HTTP error statuses are not errors here: the vendor's error envelope is
/// handed back as text (admin calls) or fails to parse (data calls).
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, TLS, timeout or body-read failure. Never retried.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request construction or response parsing error from the core crate.
    #[error(transparent)]
    Core(#[from] PineconeError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, ClientError::Core(PineconeError::MalformedResponse { .. }))
    }

    pub fn is_request_construction(&self) -> bool {
        matches!(self, ClientError::Core(PineconeError::RequestConstruction(_)))
    }
}

// Define a Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
