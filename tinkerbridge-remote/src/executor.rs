//! The pluggable execution boundary.
//!
//! This layer does not manage connections: the host database client supplies
//! an implementation of [`GraphExecutor`] and keeps pooling, retries and
//! host selection to itself. The adapter calls `execute_graph` once per
//! submitted traversal and decodes whatever rows come back.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//! use tinkerbridge_remote::{ExecutorError, GraphExecutor, GraphQueryOptions, GraphResultRow};
//!
//! struct MyClient { /* ... */ }
//!
//! #[async_trait]
//! impl GraphExecutor for MyClient {
//!     async fn execute_graph(
//!         &self,
//!         query: &str,
//!         parameters: Option<&serde_json::Value>,
//!         options: &GraphQueryOptions,
//!     ) -> Result<Vec<GraphResultRow>, ExecutorError> {
//!         // Send the query over the wire and collect rows.
//!     }
//! }
//! ```

use crate::error::ExecutorError;
use crate::options::GraphQueryOptions;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One result row returned by the executor.
///
/// The `gremlin` carrier field holds the row's embedded JSON-encoded result
/// payload (`{"result": ..., "bulk": ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphResultRow {
    pub gremlin: String,
}

impl GraphResultRow {
    /// Create a row from its embedded payload text.
    pub fn new(gremlin: impl Into<String>) -> Self {
        Self {
            gremlin: gremlin.into(),
        }
    }
}

/// Executes a rendered graph query against the remote server.
///
/// Implementations own transport concerns entirely; errors they return are
/// propagated to the caller unchanged.
#[async_trait]
pub trait GraphExecutor: Send + Sync {
    /// Execute a rendered query and return its result rows.
    async fn execute_graph(
        &self,
        query: &str,
        parameters: Option<&JsonValue>,
        options: &GraphQueryOptions,
    ) -> std::result::Result<Vec<GraphResultRow>, ExecutorError>;
}
