//! Error types for GraphSON serialization.

use thiserror::Error;

/// Result type alias using GraphSonError.
pub type Result<T> = std::result::Result<T, GraphSonError>;

/// GraphSON serialization errors.
#[derive(Error, Debug)]
pub enum GraphSonError {
    /// Codec table misconfiguration (e.g. empty wire tag). Raised while the
    /// registry is built, never per request.
    #[error("Invalid codec configuration: {0}")]
    Config(String),

    /// Protocol literal not supported by the query-rendering entry point.
    #[error("Protocol '{protocol}' not supported")]
    UnsupportedProtocol { protocol: String },

    /// Value cannot be encoded under the selected protocol.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Wire payload does not match the shape its tag requires.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid geometry or radius supplied to a geo predicate builder.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A traversal batch must contain at least one traversal.
    #[error("Batch must contain at least one traversal")]
    EmptyBatch,
}

impl GraphSonError {
    /// Create a codec configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        GraphSonError::Config(msg.into())
    }

    /// Create an encode error.
    pub fn encode(msg: impl Into<String>) -> Self {
        GraphSonError::Encode(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        GraphSonError::Decode(msg.into())
    }

    /// Create an invalid geometry error.
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        GraphSonError::InvalidGeometry(msg.into())
    }
}
