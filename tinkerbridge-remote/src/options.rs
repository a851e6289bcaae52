//! Query options attached to every submitted traversal.

use serde::{Deserialize, Serialize};

/// Graph language literal identifying bytecode-form queries.
///
/// This adapter only ever submits bytecode, never script text, so the
/// language is forced to this literal regardless of caller input.
pub const GRAPH_LANGUAGE_BYTECODE: &str = "bytecode-json";

/// Options forwarded to the executor with each submitted traversal.
///
/// All fields are optional; absent fields leave the executor's own defaults
/// in effect. Merging is a pure function — the caller's struct is never
/// mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQueryOptions {
    /// Query language identifier. Forced to [`GRAPH_LANGUAGE_BYTECODE`] when
    /// the options are bound to a connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_language: Option<String>,

    /// Name of the graph to execute against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_name: Option<String>,

    /// Traversal source on the server side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_source: Option<String>,

    /// Execution profile name in the host driver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_profile: Option<String>,

    /// Wire protocol hint (`graphson-2.0` or `graphson-3.0`). Unrecognized
    /// values fall back to GraphSON2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_protocol: Option<String>,
}

impl GraphQueryOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the graph name.
    pub fn with_graph_name(mut self, graph_name: impl Into<String>) -> Self {
        self.graph_name = Some(graph_name.into());
        self
    }

    /// Set the traversal source.
    pub fn with_graph_source(mut self, graph_source: impl Into<String>) -> Self {
        self.graph_source = Some(graph_source.into());
        self
    }

    /// Set the execution profile.
    pub fn with_execution_profile(mut self, profile: impl Into<String>) -> Self {
        self.execution_profile = Some(profile.into());
        self
    }

    /// Set the wire protocol hint.
    pub fn with_graph_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.graph_protocol = Some(protocol.into());
        self
    }

    /// The options actually used for a bytecode submission: a copy with the
    /// graph language forced to the bytecode literal.
    pub fn for_bytecode_submission(&self) -> Self {
        let mut options = self.clone();
        options.graph_language = Some(GRAPH_LANGUAGE_BYTECODE.to_string());
        options
    }
}
