//! Abstract resource-instance vertex.

use std::any::Any;
use std::sync::Arc;

use rx_core::{Block, ResourceAddress, ResourceInstanceAddress};
use rx_graph::Vertex;

/// Base vertex for one resource instance.
///
/// Carries the instance address and the resource schema shared by every
/// instance of the same resource. Construction policies wrap it into richer
/// vertex types.
#[derive(Debug, Clone)]
pub struct NodeAbstractResourceInstance {
    addr: ResourceInstanceAddress,
    schema: Arc<Block>,
}

impl NodeAbstractResourceInstance {
    pub fn new(addr: ResourceInstanceAddress, schema: Arc<Block>) -> Self {
        Self { addr, schema }
    }

    pub fn addr(&self) -> &ResourceInstanceAddress {
        &self.addr
    }

    pub fn resource_addr(&self) -> &ResourceAddress {
        self.addr.resource()
    }

    pub fn schema(&self) -> &Arc<Block> {
        &self.schema
    }
}

impl Vertex for NodeAbstractResourceInstance {
    fn name(&self) -> String {
        self.addr.to_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
