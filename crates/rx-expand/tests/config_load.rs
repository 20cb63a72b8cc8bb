use rx_expand::config::{ExpansionFile, ResourceDef, save_yaml};
use rx_expand::{
    ExpandError, NodeResourceInstance, Phase, PhasePolicy, PlanOptions, ValidationError,
    expand_resources, load, load_json, load_yaml,
};
use serde_json::json;
use std::sync::Arc;

fn sample() -> ExpansionFile {
    ExpansionFile {
        version: 1,
        resources: vec![
            ResourceDef::new("data.aws_ami.ubuntu"),
            ResourceDef::new("module.net[\"east\"].aws_subnet.private")
                .with_for_each([("a", json!("10.0.1.0/24")), ("b", json!("10.0.2.0/24"))]),
            ResourceDef::new("aws_instance.web").with_count(2),
        ],
    }
}

#[test]
fn save_and_load_yaml() {
    let file = sample();
    let path = std::env::temp_dir().join("rx_expand_save_and_load.yaml");

    save_yaml(&path, &file).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(file, loaded);
}

#[test]
fn load_dispatches_on_extension() {
    let path = std::env::temp_dir().join("rx_expand_dispatch.json");
    std::fs::write(&path, serde_json::to_string_pretty(&sample()).unwrap()).unwrap();

    assert_eq!(load(&path).unwrap(), sample());
    assert_eq!(load_json(&path).unwrap(), sample());
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("rx_expand_does_not_exist.yaml");
    assert!(matches!(load_yaml(&path), Err(ExpandError::Io(_))));
}

#[test]
fn conflicting_repetition_rejected_on_load() {
    let path = std::env::temp_dir().join("rx_expand_conflict.yaml");
    std::fs::write(
        &path,
        "version: 1
resources:
  - address: aws_instance.web
    count: 1
    for_each:
      a: 1
",
    )
    .unwrap();

    let err = load_yaml(&path).unwrap_err();
    assert!(matches!(
        err,
        ExpandError::Validation(ValidationError::CountAndForEach { .. })
    ));
    assert!(err.to_string().contains("aws_instance.web"));
}

#[test]
fn loaded_file_expands_with_phase_policy() {
    let file = sample();
    let graph = expand_resources(
        &file.resources,
        Some(Arc::new(PhasePolicy(Phase::Apply))),
        PlanOptions::default(),
    )
    .unwrap();

    assert_eq!(
        graph.names(),
        vec![
            "data.aws_ami.ubuntu (apply)",
            "module.net[\"east\"].aws_subnet.private[\"a\"] (apply)",
            "module.net[\"east\"].aws_subnet.private[\"b\"] (apply)",
            "aws_instance.web[0] (apply)",
            "aws_instance.web[1] (apply)",
        ]
    );
    assert!(
        graph
            .vertices_of::<NodeResourceInstance>()
            .all(|n| n.phase() == Phase::Apply)
    );
}
