//! Graph transformation steps.

use crate::error::GraphResult;
use crate::graph::Graph;

/// A step that mutates a graph, typically by adding vertices or edges.
///
/// Steps run in sequence inside [`GraphBuilder`](crate::GraphBuilder); the
/// first error aborts the build.
pub trait GraphTransformer: Send + Sync {
    /// Short label used in logs and step errors.
    fn label(&self) -> String {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("transformer")
            .to_string()
    }

    fn transform(&self, graph: &mut Graph) -> GraphResult<()>;
}

impl<T: GraphTransformer + ?Sized> GraphTransformer for Box<T> {
    fn label(&self) -> String {
        (**self).label()
    }

    fn transform(&self, graph: &mut Graph) -> GraphResult<()> {
        (**self).transform(graph)
    }
}
