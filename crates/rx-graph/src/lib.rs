//! rx-graph: dependency graph layer for rexpand.
//!
//! Provides:
//! - The `Vertex` trait and a petgraph-backed vertex container (`Graph`)
//! - `GraphTransformer` steps and a `GraphBuilder` that runs them in order
//! - Structural validation (duplicate names, cycles)
//!
//! # Example
//!
//! ```
//! use rx_graph::{Graph, NamedVertex};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_vertex(NamedVertex::new("provider.aws")).unwrap();
//! let b = graph.add_vertex(NamedVertex::new("aws_instance.web")).unwrap();
//! graph.connect(b, a).unwrap();
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod transform;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{DuplicatePolicy, Graph, NamedVertex, Vertex, VertexId};
pub use transform::GraphTransformer;
