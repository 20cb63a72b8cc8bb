//! Graph-specific error types.

use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A vertex with the same name is already registered and the graph rejects duplicates.
    #[error("Vertex {name} is already present in the graph")]
    DuplicateVertex { name: String },

    /// The graph's vertex storage is full.
    #[error("Graph vertex limit of {limit} reached while adding {name}")]
    CapacityExceeded { limit: usize, name: String },

    /// An edge endpoint does not exist.
    #[error("Vertex index {index} does not exist")]
    MissingVertex { index: usize },

    /// An edge would connect a vertex to itself.
    #[error("Vertex {name} cannot depend on itself")]
    SelfLoop { name: String },

    /// The dependency edges form a cycle.
    #[error("Dependency cycle detected involving {name}")]
    Cycle { name: String },

    /// A builder step failed.
    #[error("Graph step {step} failed: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<GraphError>,
    },
}
