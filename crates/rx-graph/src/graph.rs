//! Core graph data structures.

use core::fmt;
use std::any::Any;
use std::collections::HashMap;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::error::{GraphError, GraphResult};

/// Stable handle to a vertex. Remains valid while other vertices are added.
pub type VertexId = NodeIndex;

/// A planning unit stored in the graph.
///
/// Vertices are opaque to the graph apart from their name, which is used for
/// duplicate detection and diagnostics. Concrete types are recovered with
/// [`downcast_ref`](trait.Vertex.html#method.downcast_ref).
pub trait Vertex: fmt::Debug + Send + Sync + 'static {
    /// Human readable, ideally unique, vertex name.
    fn name(&self) -> String;

    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn Vertex + 'a {
    /// Recover the concrete vertex type.
    pub fn downcast_ref<T: Vertex>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Vertex>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Minimal vertex carrying only a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedVertex {
    name: String,
}

impl NamedVertex {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Vertex for NamedVertex {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// What `Graph::add` does when a vertex name is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Vertices are distinct objects; equal names are stored side by side.
    #[default]
    Allow,
    /// A second vertex with an existing name is an error.
    Reject,
}

/// Dependency graph of planning vertices.
///
/// Edges point from a vertex to the vertices it depends on.
#[derive(Debug, Default)]
pub struct Graph {
    pub(crate) inner: StableDiGraph<Box<dyn Vertex>, ()>,
    /// Number of live vertices per name.
    names: HashMap<String, usize>,
    duplicates: DuplicatePolicy,
    max_vertices: Option<usize>,
}

impl Graph {
    /// Create an empty graph that allows duplicate names and has no size limit.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Bound the number of vertices the graph will store.
    pub fn with_max_vertices(mut self, limit: usize) -> Self {
        self.max_vertices = Some(limit);
        self
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn max_vertices(&self) -> Option<usize> {
        self.max_vertices
    }

    /// Register a vertex and return its handle.
    pub fn add(&mut self, vertex: Box<dyn Vertex>) -> GraphResult<VertexId> {
        let name = vertex.name();

        if let Some(limit) = self.max_vertices {
            if self.inner.node_count() >= limit {
                return Err(GraphError::CapacityExceeded { limit, name });
            }
        }
        if self.duplicates == DuplicatePolicy::Reject && self.names.contains_key(&name) {
            return Err(GraphError::DuplicateVertex { name });
        }

        let id = self.inner.add_node(vertex);
        tracing::trace!(vertex = %name, index = id.index(), "added vertex");
        *self.names.entry(name).or_default() += 1;
        Ok(id)
    }

    /// Convenience wrapper around [`Graph::add`] for concrete vertex types.
    pub fn add_vertex<V: Vertex>(&mut self, vertex: V) -> GraphResult<VertexId> {
        self.add(Box::new(vertex))
    }

    /// Record that `from` depends on `to`. Connecting twice is a no-op.
    pub fn connect(&mut self, from: VertexId, to: VertexId) -> GraphResult<()> {
        for id in [from, to] {
            if !self.inner.contains_node(id) {
                return Err(GraphError::MissingVertex { index: id.index() });
            }
        }
        if from == to {
            return Err(GraphError::SelfLoop {
                name: self.inner[from].name(),
            });
        }
        self.inner.update_edge(from, to, ());
        Ok(())
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.inner.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Get a vertex by handle (returns None if it doesn't exist).
    pub fn vertex(&self, id: VertexId) -> Option<&dyn Vertex> {
        self.inner.node_weight(id).map(|v| v.as_ref())
    }

    /// Iterate over all vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &dyn Vertex)> {
        self.inner
            .node_indices()
            .map(move |id| (id, self.inner[id].as_ref()))
    }

    /// Iterate over the vertices of one concrete type.
    pub fn vertices_of<T: Vertex>(&self) -> impl Iterator<Item = &T> {
        self.inner
            .node_indices()
            .filter_map(move |id| self.inner[id].downcast_ref::<T>())
    }

    /// Names of all vertices in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.vertices().map(|(_, v)| v.name()).collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Number of vertices registered under `name`.
    pub fn count_named(&self, name: &str) -> usize {
        self.names.get(name).copied().unwrap_or(0)
    }

    /// Vertices `id` depends on.
    pub fn dependencies(&self, id: VertexId) -> Vec<VertexId> {
        self.inner
            .neighbors_directed(id, Direction::Outgoing)
            .collect()
    }

    /// Consume the graph, returning its vertices in insertion order. Edges are dropped.
    pub fn into_vertices(mut self) -> Vec<Box<dyn Vertex>> {
        let ids: Vec<VertexId> = self.inner.node_indices().collect();
        ids.into_iter()
            .filter_map(|id| self.inner.remove_node(id))
            .collect()
    }

    /// Names registered more than once, sorted.
    pub(crate) fn duplicate_names(&self) -> Vec<&str> {
        let mut dups: Vec<&str> = self
            .names
            .iter()
            .filter(|&(_, &n)| n > 1)
            .map(|(name, _)| name.as_str())
            .collect();
        dups.sort_unstable();
        dups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Marker(u32);

    impl Vertex for Marker {
        fn name(&self) -> String {
            format!("marker.{}", self.0)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn add_and_lookup() {
        let mut graph = Graph::new();
        let a = graph.add_vertex(NamedVertex::new("a")).unwrap();
        let m = graph.add_vertex(Marker(7)).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.vertex(a).unwrap().name(), "a");
        assert!(graph.vertex(m).unwrap().is::<Marker>());
        assert_eq!(graph.vertices_of::<Marker>().next().unwrap().0, 7);
        assert_eq!(graph.names(), vec!["a", "marker.7"]);
    }

    #[test]
    fn duplicates_allowed_by_default() {
        let mut graph = Graph::new();
        graph.add_vertex(NamedVertex::new("x")).unwrap();
        graph.add_vertex(NamedVertex::new("x")).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.count_named("x"), 2);
        assert!(graph.contains_name("x"));
        assert!(!graph.contains_name("y"));
        assert_eq!(graph.duplicate_names(), vec!["x"]);
    }

    #[test]
    fn duplicates_rejected() {
        let mut graph = Graph::new().with_duplicate_policy(DuplicatePolicy::Reject);
        graph.add_vertex(NamedVertex::new("x")).unwrap();
        let err = graph.add_vertex(NamedVertex::new("x")).unwrap_err();

        assert!(matches!(err, GraphError::DuplicateVertex { ref name } if name == "x"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn capacity_limit() {
        let mut graph = Graph::new().with_max_vertices(1);
        graph.add_vertex(NamedVertex::new("a")).unwrap();
        let err = graph.add_vertex(NamedVertex::new("b")).unwrap_err();

        assert!(matches!(err, GraphError::CapacityExceeded { limit: 1, .. }));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn connect_rejects_self_loop() {
        let mut graph = Graph::new();
        let a = graph.add_vertex(NamedVertex::new("a")).unwrap();
        assert!(matches!(
            graph.connect(a, a),
            Err(GraphError::SelfLoop { .. })
        ));
        assert!(matches!(
            graph.connect(a, VertexId::new(42)),
            Err(GraphError::MissingVertex { index: 42 })
        ));
    }

    #[test]
    fn into_vertices_keeps_order() {
        let mut graph = Graph::new();
        for name in ["c", "a", "b"] {
            graph.add_vertex(NamedVertex::new(name)).unwrap();
        }
        let names: Vec<String> = graph.into_vertices().iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
