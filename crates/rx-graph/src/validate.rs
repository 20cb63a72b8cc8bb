//! Graph validation logic.

use petgraph::algo::toposort;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Validate the finished graph: vertex names are unique and dependencies are acyclic.
pub(crate) fn validate_graph(graph: &Graph) -> GraphResult<()> {
    if let Some(name) = graph.duplicate_names().first() {
        return Err(GraphError::DuplicateVertex {
            name: name.to_string(),
        });
    }

    toposort(&graph.inner, None).map_err(|cycle| GraphError::Cycle {
        name: graph.inner[cycle.node_id()].name(),
    })?;

    Ok(())
}
