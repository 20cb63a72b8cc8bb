//! Resource expansion: one graph vertex per resource instance.

use std::collections::BTreeMap;
use std::sync::Arc;

use rx_core::{Block, InstanceKey, ResourceAddress, Value};
use rx_graph::{Graph, GraphResult, GraphTransformer};

use crate::node::NodeAbstractResourceInstance;
use crate::policy::{AbstractPolicy, ConcretePolicy};
use crate::repetition::Repetition;

/// Expands a single resource into its instance vertices.
///
/// Count and for-each must already be resolved. Expansion only adds vertices;
/// it never connects or removes anything.
///
/// ```
/// use std::sync::Arc;
/// use rx_core::{Block, ResourceAddress};
/// use rx_expand::ResourceExpander;
/// use rx_graph::Graph;
///
/// let addr = ResourceAddress::new("aws_instance", "web");
/// let expander = ResourceExpander::new(addr, Arc::new(Block::new())).with_count(2);
/// let mut graph = Graph::new();
/// expander.expand(&mut graph).unwrap();
///
/// assert_eq!(graph.names(), vec!["aws_instance.web[0]", "aws_instance.web[1]"]);
/// ```
#[derive(Clone)]
pub struct ResourceExpander {
    addr: ResourceAddress,
    schema: Arc<Block>,
    repetition: Repetition,
    concrete: Arc<dyn ConcretePolicy>,
}

impl ResourceExpander {
    /// Expander for an unrepeated resource inserting abstract nodes
    /// through [`AbstractPolicy`].
    pub fn new(addr: ResourceAddress, schema: Arc<Block>) -> Self {
        Self {
            addr,
            schema,
            repetition: Repetition::unset(),
            concrete: Arc::new(AbstractPolicy),
        }
    }

    /// Set the count. Negative values mean count is unset.
    pub fn with_count(mut self, count: i64) -> Self {
        self.repetition.count = count;
        self
    }

    pub fn with_for_each(mut self, for_each: BTreeMap<String, Value>) -> Self {
        self.repetition.for_each = Some(for_each);
        self
    }

    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = repetition;
        self
    }

    /// Route every abstract node through `policy` before insertion.
    pub fn with_policy(mut self, policy: Arc<dyn ConcretePolicy>) -> Self {
        self.concrete = policy;
        self
    }

    pub fn addr(&self) -> &ResourceAddress {
        &self.addr
    }

    pub fn schema(&self) -> &Arc<Block> {
        &self.schema
    }

    pub fn repetition(&self) -> &Repetition {
        &self.repetition
    }

    pub fn policy(&self) -> &Arc<dyn ConcretePolicy> {
        &self.concrete
    }

    /// Add one vertex per instance of the resource to `graph`.
    ///
    /// The first insertion failure is returned as-is; vertices added before it
    /// stay in the graph.
    pub fn expand(&self, graph: &mut Graph) -> GraphResult<()> {
        let rep = &self.repetition;

        if rep.is_unset() {
            tracing::debug!(resource = %self.addr, "expanding unrepeated resource");
            return self.emit(graph, InstanceKey::NoKey);
        }

        if rep.has_conflict() {
            tracing::warn!(
                resource = %self.addr,
                count = rep.count,
                for_each = rep.for_each.as_ref().map_or(0, BTreeMap::len),
                "both count and for_each are set; expanding both"
            );
        }
        tracing::debug!(
            resource = %self.addr,
            instances = rep.expected_instances(),
            "expanding resource"
        );

        if let Some(for_each) = &rep.for_each {
            for key in for_each.keys() {
                self.emit(graph, InstanceKey::Str(key.clone()))?;
            }
        }

        for i in 0..rep.count {
            self.emit(graph, InstanceKey::Int(i))?;
        }

        Ok(())
    }

    fn emit(&self, graph: &mut Graph, key: InstanceKey) -> GraphResult<()> {
        let addr = self.addr.instance(key);
        let node = NodeAbstractResourceInstance::new(addr, Arc::clone(&self.schema));
        graph.add(self.concrete.wrap(node))?;
        Ok(())
    }
}

impl std::fmt::Debug for ResourceExpander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceExpander")
            .field("addr", &self.addr.to_string())
            .field("repetition", &self.repetition)
            .field("concrete", &self.concrete.label())
            .finish()
    }
}

impl GraphTransformer for ResourceExpander {
    fn label(&self) -> String {
        format!("expand {}", self.addr)
    }

    fn transform(&self, graph: &mut Graph) -> GraphResult<()> {
        self.expand(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn web() -> ResourceExpander {
        ResourceExpander::new(ResourceAddress::new("aws_instance", "web"), Arc::new(Block::new()))
    }

    #[test]
    fn unset_count_emits_no_key() {
        let mut graph = Graph::new();
        web().expand(&mut graph).unwrap();
        assert_eq!(graph.names(), vec!["aws_instance.web"]);
    }

    #[test]
    fn for_each_before_count() {
        let mut graph = Graph::new();
        let for_each = BTreeMap::from([("x".to_string(), json!("v1"))]);
        web()
            .with_for_each(for_each)
            .with_count(2)
            .expand(&mut graph)
            .unwrap();

        assert_eq!(
            graph.names(),
            vec![
                "aws_instance.web[\"x\"]",
                "aws_instance.web[0]",
                "aws_instance.web[1]"
            ]
        );
    }

    #[test]
    fn schema_is_shared() {
        let schema = Arc::new(Block::new());
        let addr = ResourceAddress::new("null_resource", "n");
        let expander = ResourceExpander::new(addr, schema.clone()).with_count(3);
        let mut graph = Graph::new();
        expander.expand(&mut graph).unwrap();

        for node in graph.vertices_of::<NodeAbstractResourceInstance>() {
            assert!(Arc::ptr_eq(node.schema(), &schema));
        }
        assert_eq!(Arc::strong_count(&schema), 5);
    }

    #[test]
    fn default_policy_is_abstract() {
        let expander = web().with_count(1);
        assert_eq!(expander.policy().label(), "AbstractPolicy");
        assert!(format!("{:?}", expander).contains("concrete: \"AbstractPolicy\""));

        let mut default_graph = Graph::new();
        expander.expand(&mut default_graph).unwrap();
        let mut explicit_graph = Graph::new();
        expander
            .clone()
            .with_policy(Arc::new(AbstractPolicy))
            .expand(&mut explicit_graph)
            .unwrap();

        assert_eq!(default_graph.names(), explicit_graph.names());
        assert_eq!(
            default_graph.vertices_of::<NodeAbstractResourceInstance>().count(),
            1
        );
    }

    #[test]
    fn debug_reports_policy() {
        let expander = web().with_policy(Arc::new(crate::policy::PhasePolicy(
            crate::policy::Phase::Apply,
        )));
        assert!(format!("{:?}", expander).contains("PhasePolicy(apply)"));
    }

    #[test]
    fn label_names_resource() {
        assert_eq!(web().label(), "expand aws_instance.web");
    }
}
