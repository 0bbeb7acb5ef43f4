use thiserror::Error;

/// The main result type for pinecone-core operations.
pub type PineconeResult<T> = Result<T, PineconeError>;

/// Enum representing possible errors within the pinecone-core library.
#[derive(Error, Debug)]
pub enum PineconeError {
    /// A request could not be turned into an HTTP call (body serialization,
    /// URL or header construction). Retrying will not help.
    #[error("Request construction error: {0}")]
    RequestConstruction(String),

    /// The response body is not valid JSON or a field has the wrong shape.
    #[error("Malformed response at '{field}': {reason}")]
    MalformedResponse { field: String, reason: String },
}

impl PineconeError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PineconeError::MalformedResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// Serialization only ever happens while building a request body.
impl From<serde_json::Error> for PineconeError {
    fn from(err: serde_json::Error) -> Self {
        PineconeError::RequestConstruction(format!("JSON serialization failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_request_construction() {
        let err = PineconeError::RequestConstruction("bad header".to_string());
        assert_eq!(format!("{}", err), "Request construction error: bad header");
    }

    #[test]
    fn test_error_display_malformed_response() {
        let err = PineconeError::malformed("matches[0].id", "not a UUID");
        assert_eq!(format!("{}", err), "Malformed response at 'matches[0].id': not a UUID");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: PineconeError = json_err.into();
        match err {
            PineconeError::RequestConstruction(msg) => assert!(msg.contains("JSON serialization failed")),
            _ => panic!("Expected PineconeError::RequestConstruction variant"),
        }
    }
}
