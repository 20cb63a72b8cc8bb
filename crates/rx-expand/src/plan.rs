//! Expansion of many resources into one graph.

use std::sync::Arc;

use rayon::prelude::*;
use rx_graph::{DuplicatePolicy, Graph, GraphBuilder, GraphResult, Vertex};

use crate::config::ResourceDef;
use crate::error::ExpandResult;
use crate::expander::ResourceExpander;
use crate::policy::ConcretePolicy;
use crate::validate::validate_resources;

/// Destination graph settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    pub duplicates: DuplicatePolicy,
    pub max_vertices: Option<usize>,
}

impl PlanOptions {
    fn graph(&self) -> Graph {
        let graph = Graph::new().with_duplicate_policy(self.duplicates);
        match self.max_vertices {
            Some(limit) => graph.with_max_vertices(limit),
            None => graph,
        }
    }
}

fn expanders(
    resources: &[ResourceDef],
    policy: Option<Arc<dyn ConcretePolicy>>,
) -> ExpandResult<Vec<ResourceExpander>> {
    let addrs = validate_resources(resources)?;
    Ok(resources
        .iter()
        .zip(addrs)
        .map(|(def, addr)| def.expander_at(addr, policy.clone()))
        .collect())
}

/// Expand every resource and merge the instances into one graph.
///
/// Each resource is expanded into its own scratch graph in parallel; the
/// scratch vertices are then added to the destination in declaration order,
/// so the result does not depend on thread scheduling.
pub fn expand_resources(
    resources: &[ResourceDef],
    policy: Option<Arc<dyn ConcretePolicy>>,
    options: PlanOptions,
) -> ExpandResult<Graph> {
    let expanders = expanders(resources, policy)?;

    let scratch = expanders
        .par_iter()
        .map(|expander| -> GraphResult<Vec<Box<dyn Vertex>>> {
            let mut graph = Graph::new();
            expander.expand(&mut graph)?;
            Ok(graph.into_vertices())
        })
        .collect::<GraphResult<Vec<_>>>()?;

    let mut graph = options.graph();
    for vertex in scratch.into_iter().flatten() {
        graph.add(vertex)?;
    }
    tracing::info!(
        resources = resources.len(),
        vertices = graph.len(),
        "expanded resources"
    );
    Ok(graph)
}

/// Queue one expansion step per resource, in declaration order.
///
/// Sequential counterpart of [`expand_resources`] that leaves room for further
/// steps before the graph is built.
pub fn graph_builder(
    resources: &[ResourceDef],
    policy: Option<Arc<dyn ConcretePolicy>>,
    options: PlanOptions,
) -> ExpandResult<GraphBuilder> {
    let mut builder = GraphBuilder::new().duplicate_policy(options.duplicates);
    if let Some(limit) = options.max_vertices {
        builder = builder.max_vertices(limit);
    }
    for expander in expanders(resources, policy)? {
        builder = builder.step(expander);
    }
    Ok(builder)
}
