//! Node construction policies.
//!
//! The expander builds a [`NodeAbstractResourceInstance`] per instance and hands
//! it to a [`ConcretePolicy`], which decides the vertex type that actually lands
//! in the graph. This keeps expansion independent of the walk-specific vertex
//! types used for planning, applying, refreshing or destroying.

use core::fmt;
use std::any::Any;
use std::str::FromStr;

use rx_core::ResourceInstanceAddress;
use rx_graph::Vertex;

use crate::node::NodeAbstractResourceInstance;

/// Turns an abstract instance node into the vertex inserted into the graph.
pub trait ConcretePolicy: Send + Sync {
    /// Short label used in diagnostics.
    fn label(&self) -> String {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("policy")
            .to_string()
    }

    fn wrap(&self, node: NodeAbstractResourceInstance) -> Box<dyn Vertex>;
}

/// Inserts the abstract node unmodified.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbstractPolicy;

impl ConcretePolicy for AbstractPolicy {
    fn wrap(&self, node: NodeAbstractResourceInstance) -> Box<dyn Vertex> {
        Box::new(node)
    }
}

impl<F> ConcretePolicy for F
where
    F: Fn(NodeAbstractResourceInstance) -> Box<dyn Vertex> + Send + Sync,
{
    fn wrap(&self, node: NodeAbstractResourceInstance) -> Box<dyn Vertex> {
        self(node)
    }
}

/// Graph walk a concrete instance vertex participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Plan,
    Apply,
    Refresh,
    Destroy,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Plan => "plan",
            Phase::Apply => "apply",
            Phase::Refresh => "refresh",
            Phase::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plan" => Ok(Phase::Plan),
            "apply" => Ok(Phase::Apply),
            "refresh" => Ok(Phase::Refresh),
            "destroy" => Ok(Phase::Destroy),
            other => Err(format!("unknown phase: {other}")),
        }
    }
}

/// Resource instance vertex bound to one walk phase.
#[derive(Debug, Clone)]
pub struct NodeResourceInstance {
    phase: Phase,
    node: NodeAbstractResourceInstance,
}

impl NodeResourceInstance {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn inner(&self) -> &NodeAbstractResourceInstance {
        &self.node
    }

    pub fn addr(&self) -> &ResourceInstanceAddress {
        self.node.addr()
    }
}

impl Vertex for NodeResourceInstance {
    fn name(&self) -> String {
        format!("{} ({})", self.node.addr(), self.phase)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Wraps every instance into a [`NodeResourceInstance`] for one phase.
#[derive(Debug, Clone, Copy)]
pub struct PhasePolicy(pub Phase);

impl ConcretePolicy for PhasePolicy {
    fn label(&self) -> String {
        format!("PhasePolicy({})", self.0)
    }

    fn wrap(&self, node: NodeAbstractResourceInstance) -> Box<dyn Vertex> {
        Box::new(NodeResourceInstance {
            phase: self.0,
            node,
        })
    }
}
