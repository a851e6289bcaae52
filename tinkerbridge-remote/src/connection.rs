//! Remote connection adapter: bytecode in, traversers out.

use crate::error::Result;
use crate::executor::GraphExecutor;
use crate::options::GraphQueryOptions;
use tinkerbridge_graphson::{parse_row, writer_for, Bytecode, GraphValue, Traverser};
use tracing::debug;

/// A remote connection submitting traversal bytecode through an executor.
///
/// The options are fixed at construction (with the graph language forced to
/// the bytecode literal); each `submit` call builds its own query text and
/// decodes its own response, so concurrent submissions against one
/// connection need no coordination.
pub struct RemoteGraphConnection<E> {
    executor: E,
    options: GraphQueryOptions,
}

impl<E: GraphExecutor> RemoteGraphConnection<E> {
    /// Create a connection with default options.
    pub fn new(executor: E) -> Self {
        Self::with_options(executor, GraphQueryOptions::default())
    }

    /// Create a connection with explicit options.
    pub fn with_options(executor: E, options: GraphQueryOptions) -> Self {
        Self {
            executor,
            options: options.for_bytecode_submission(),
        }
    }

    /// The options sent with every submission.
    pub fn options(&self) -> &GraphQueryOptions {
        &self.options
    }

    /// The underlying executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Submit traversal bytecode and decode the result rows.
    ///
    /// Transport and server errors from the executor propagate unchanged;
    /// this layer adds no retry and imposes no timeout.
    pub async fn submit(&self, bytecode: &Bytecode) -> Result<RemoteTraversal> {
        let protocol = self.options.graph_protocol.as_deref();
        let query = writer_for(protocol).write_bytecode(bytecode)?;
        debug!(steps = bytecode.steps().len(), "submitting traversal");

        let rows = self
            .executor
            .execute_graph(&query, None, &self.options)
            .await?;

        let traversers = rows
            .iter()
            .map(|row| parse_row(&row.gremlin, protocol))
            .collect::<tinkerbridge_graphson::Result<Vec<_>>>()?;
        Ok(RemoteTraversal::new(traversers))
    }
}

/// The decoded result of one submitted traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteTraversal {
    traversers: Vec<Traverser>,
}

impl RemoteTraversal {
    /// Wrap decoded traversers.
    pub fn new(traversers: Vec<Traverser>) -> Self {
        Self { traversers }
    }

    /// The traversers with their bulk counts intact.
    pub fn traversers(&self) -> &[Traverser] {
        &self.traversers
    }

    /// Expand bulk counts into a flat sequence of values.
    pub fn flatten(self) -> Vec<GraphValue> {
        let mut values = Vec::with_capacity(self.traversers.len());
        for traverser in self.traversers {
            for _ in 1..traverser.bulk {
                values.push(traverser.object.clone());
            }
            values.push(traverser.object);
        }
        values
    }
}
