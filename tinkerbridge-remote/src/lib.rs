//! Remote connection adapter for graph traversal submission.
//!
//! This crate is the glue between traversal bytecode and the host database
//! client: it renders bytecode to GraphSON through
//! [`tinkerbridge-graphson`](tinkerbridge_graphson), forwards it to a
//! caller-supplied [`GraphExecutor`] with protocol-aware request options,
//! and maps the returned rows back into [`Traverser`] results.
//!
//! Connection pooling, retries, host selection and cancellation all belong
//! to the executor implementation; this layer holds no per-call state
//! beyond the options fixed at construction.

mod connection;
mod error;
mod executor;
mod options;

pub use connection::{RemoteGraphConnection, RemoteTraversal};
pub use error::{ExecutorError, RemoteError, Result};
pub use executor::{GraphExecutor, GraphResultRow};
pub use options::{GraphQueryOptions, GRAPH_LANGUAGE_BYTECODE};

pub use tinkerbridge_graphson::{Bytecode, GraphValue, Traverser};
