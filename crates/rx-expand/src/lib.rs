//! rx-expand: resource-instance expansion for the planning graph.
//!
//! A resource declaration may stand for zero, one or many real objects. This
//! crate turns a declaration with resolved `count` / `for_each` arguments into
//! one graph vertex per instance address, so later stages only ever see
//! concrete instances.

pub mod config;
pub mod error;
pub mod expander;
pub mod node;
pub mod plan;
pub mod policy;
pub mod repetition;
pub mod validate;

pub use config::{ExpansionFile, LATEST_VERSION, ResourceDef, load, load_json, load_yaml};
pub use error::{ExpandError, ExpandResult};
pub use expander::ResourceExpander;
pub use node::NodeAbstractResourceInstance;
pub use plan::{PlanOptions, expand_resources, graph_builder};
pub use policy::{AbstractPolicy, ConcretePolicy, NodeResourceInstance, Phase, PhasePolicy};
pub use repetition::{COUNT_UNSET, Repetition};
pub use validate::{ValidationError, validate_file};
