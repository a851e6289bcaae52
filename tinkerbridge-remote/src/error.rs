//! Error types for the remote connection adapter.

use thiserror::Error;

/// Errors returned by the pluggable graph executor.
///
/// This layer neither classifies nor wraps them; they surface unchanged.
pub type ExecutorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias using RemoteError.
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Remote connection errors.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Query rendering or row decoding error.
    #[error(transparent)]
    GraphSon(#[from] tinkerbridge_graphson::GraphSonError),

    /// Transport or server error propagated from the executor.
    #[error(transparent)]
    Execution(#[from] ExecutorError),
}
