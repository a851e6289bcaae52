//! Traversal bytecode boundary types.
//!
//! Bytecode is the language-neutral instruction list a traversal compiles
//! down to. This layer never interprets it; it only carries operators and
//! argument values through to the writer.

use crate::error::{GraphSonError, Result};
use crate::value::GraphValue;

/// A single bytecode instruction: an operator plus its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub operator: String,
    pub args: Vec<GraphValue>,
}

impl Instruction {
    /// Create an instruction.
    pub fn new(operator: impl Into<String>, args: Vec<GraphValue>) -> Self {
        Self {
            operator: operator.into(),
            args,
        }
    }
}

/// The serialized instruction sequence representing a graph traversal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bytecode {
    source_instructions: Vec<Instruction>,
    step_instructions: Vec<Instruction>,
}

impl Bytecode {
    /// Create empty bytecode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step instruction (builder style).
    pub fn step(mut self, operator: impl Into<String>, args: Vec<GraphValue>) -> Self {
        self.step_instructions.push(Instruction::new(operator, args));
        self
    }

    /// Append a source instruction (builder style), e.g. a strategy
    /// registration applied before the first step.
    pub fn source(mut self, operator: impl Into<String>, args: Vec<GraphValue>) -> Self {
        self.source_instructions
            .push(Instruction::new(operator, args));
        self
    }

    /// The source instructions, in application order.
    pub fn sources(&self) -> &[Instruction] {
        &self.source_instructions
    }

    /// The step instructions, in application order.
    pub fn steps(&self) -> &[Instruction] {
        &self.step_instructions
    }
}

/// An ordered sequence of traversals submitted as one atomic request.
///
/// Exists only as a transient wrapper created immediately before
/// serialization; the wire form is the protocol's list encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalBatch {
    items: Vec<Bytecode>,
}

impl TraversalBatch {
    /// Wrap an ordered, non-empty sequence of traversals.
    pub fn new(items: Vec<Bytecode>) -> Result<Self> {
        if items.is_empty() {
            return Err(GraphSonError::EmptyBatch);
        }
        Ok(Self { items })
    }

    /// The batched traversals, in submission order.
    pub fn items(&self) -> &[Bytecode] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order_is_preserved() {
        let bc = Bytecode::new()
            .step("addV", vec!["person".into()])
            .step("property", vec!["name".into(), "Matt".into()]);
        assert_eq!(bc.steps().len(), 2);
        assert_eq!(bc.steps()[0].operator, "addV");
        assert_eq!(bc.steps()[1].operator, "property");
    }

    #[test]
    fn test_sources_are_separate_from_steps() {
        let bc = Bytecode::new()
            .source("withStrategies", vec!["ReadOnlyStrategy".into()])
            .step("V", vec![]);
        assert_eq!(bc.sources().len(), 1);
        assert_eq!(bc.steps().len(), 1);
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        assert!(matches!(
            TraversalBatch::new(vec![]),
            Err(GraphSonError::EmptyBatch)
        ));
    }

    #[test]
    fn test_batch_preserves_order() {
        let a = Bytecode::new().step("addV", vec!["a".into()]);
        let b = Bytecode::new().step("addV", vec!["b".into()]);
        let batch = TraversalBatch::new(vec![a.clone(), b.clone()]).unwrap();
        assert_eq!(batch.items(), &[a, b]);
    }
}
