//! Step-wise graph builder.

use crate::error::{GraphError, GraphResult};
use crate::graph::{DuplicatePolicy, Graph};
use crate::transform::GraphTransformer;
use crate::validate;

/// Builds a graph by running transformer steps in order.
///
/// Use `step` to queue transformers, then call `build()` to run them against
/// a fresh graph and (optionally) validate the result.
#[derive(Default)]
pub struct GraphBuilder {
    steps: Vec<Box<dyn GraphTransformer>>,
    duplicates: DuplicatePolicy,
    max_vertices: Option<usize>,
    validate: bool,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transformer step.
    pub fn step(mut self, step: impl GraphTransformer + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Queue an already boxed transformer step.
    pub fn boxed_step(mut self, step: Box<dyn GraphTransformer>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn max_vertices(mut self, limit: usize) -> Self {
        self.max_vertices = Some(limit);
        self
    }

    /// Check the finished graph for duplicate names and cycles.
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Number of queued steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step and return the resulting graph.
    pub fn build(self) -> GraphResult<Graph> {
        let mut graph = Graph::new().with_duplicate_policy(self.duplicates);
        if let Some(limit) = self.max_vertices {
            graph = graph.with_max_vertices(limit);
        }

        for step in &self.steps {
            let label = step.label();
            let before = graph.len();
            step.transform(&mut graph).map_err(|source| GraphError::Step {
                step: label.clone(),
                source: Box::new(source),
            })?;
            tracing::debug!(
                step = %label,
                added = graph.len() - before,
                "graph step complete"
            );
        }

        if self.validate {
            validate::validate_graph(&graph)?;
        }
        Ok(graph)
    }
}
