//! Integration tests for rx-graph.

use rx_graph::{
    DuplicatePolicy, Graph, GraphBuilder, GraphError, GraphResult, GraphTransformer, NamedVertex,
};

/// Adds a provider vertex and one dependent per name.
struct ProviderWithDependents {
    provider: &'static str,
    dependents: Vec<&'static str>,
}

impl GraphTransformer for ProviderWithDependents {
    fn transform(&self, graph: &mut Graph) -> GraphResult<()> {
        let provider = graph.add_vertex(NamedVertex::new(self.provider))?;
        for name in &self.dependents {
            let id = graph.add_vertex(NamedVertex::new(*name))?;
            graph.connect(id, provider)?;
        }
        Ok(())
    }
}

#[test]
fn build_provider_graph() {
    let graph = GraphBuilder::new()
        .step(ProviderWithDependents {
            provider: "provider.aws",
            dependents: vec!["aws_vpc.main", "aws_instance.web"],
        })
        .validate(true)
        .build()
        .unwrap();

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.edge_count(), 2);

    let (web, _) = graph
        .vertices()
        .find(|(_, v)| v.name() == "aws_instance.web")
        .unwrap();
    let deps = graph.dependencies(web);
    assert_eq!(deps.len(), 1);
    assert_eq!(graph.vertex(deps[0]).unwrap().name(), "provider.aws");
}

#[test]
fn connect_is_idempotent() {
    let mut graph = Graph::new();
    let a = graph.add_vertex(NamedVertex::new("a")).unwrap();
    let b = graph.add_vertex(NamedVertex::new("b")).unwrap();
    graph.connect(a, b).unwrap();
    graph.connect(a, b).unwrap();

    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn strict_builder_rejects_duplicate_steps() {
    let step = || ProviderWithDependents {
        provider: "provider.aws",
        dependents: vec![],
    };
    let err = GraphBuilder::new()
        .duplicate_policy(DuplicatePolicy::Reject)
        .step(step())
        .step(step())
        .build()
        .unwrap_err();

    match err {
        GraphError::Step { source, .. } => {
            assert!(matches!(
                *source,
                GraphError::DuplicateVertex { ref name } if name == "provider.aws"
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn boxed_steps_keep_their_label() {
    let step: Box<dyn GraphTransformer> = Box::new(ProviderWithDependents {
        provider: "p",
        dependents: vec![],
    });
    assert_eq!(step.label(), "ProviderWithDependents");

    let graph = GraphBuilder::new().boxed_step(step).build().unwrap();
    assert_eq!(graph.names(), vec!["p"]);
}

#[test]
fn cycle_detected_on_validate() {
    struct Cyclic;

    impl GraphTransformer for Cyclic {
        fn transform(&self, graph: &mut Graph) -> GraphResult<()> {
            let a = graph.add_vertex(NamedVertex::new("a"))?;
            let b = graph.add_vertex(NamedVertex::new("b"))?;
            graph.connect(a, b)?;
            graph.connect(b, a)
        }
    }

    let err = GraphBuilder::new().step(Cyclic).validate(true).build().unwrap_err();
    assert!(matches!(err, GraphError::Cycle { .. }));

    // Without validation the cyclic graph is returned as-is.
    let graph = GraphBuilder::new().step(Cyclic).build().unwrap();
    assert_eq!(graph.edge_count(), 2);
}
