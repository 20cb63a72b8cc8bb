//! Resource file format.
//!
//! A resource file lists resolved resources to expand:
//!
//! ```yaml
//! version: 1
//! resources:
//!   - address: aws_instance.web
//!     count: 3
//!   - address: module.net.aws_subnet.private
//!     for_each:
//!       a: 10.0.1.0/24
//!       b: 10.0.2.0/24
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use rx_core::{Block, ResourceAddress, Value};
use serde::{Deserialize, Serialize};

use crate::error::ExpandResult;
use crate::expander::ResourceExpander;
use crate::policy::ConcretePolicy;
use crate::repetition::{COUNT_UNSET, Repetition};
use crate::validate::{ValidationError, validate_file, validate_resource};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpansionFile {
    pub version: u32,
    #[serde(default)]
    pub resources: Vec<ResourceDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceDef {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_each: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Block::is_empty")]
    pub schema: Block,
}

impl ResourceDef {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            count: None,
            for_each: None,
            schema: Block::default(),
        }
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_for_each<K: Into<String>>(
        mut self,
        entries: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        self.for_each = Some(entries.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    pub fn with_schema(mut self, schema: Block) -> Self {
        self.schema = schema;
        self
    }

    /// Repetition arguments, with an absent count mapped to the unset sentinel.
    pub fn repetition(&self) -> Repetition {
        Repetition {
            count: self.count.unwrap_or(COUNT_UNSET),
            for_each: self.for_each.clone(),
        }
    }

    /// Validate this definition and build its expander.
    pub fn expander(
        &self,
        policy: Option<Arc<dyn ConcretePolicy>>,
    ) -> Result<ResourceExpander, ValidationError> {
        let addr: ResourceAddress = validate_resource(self)?;
        Ok(self.expander_at(addr, policy))
    }

    /// Build the expander for an address that has already been validated.
    pub(crate) fn expander_at(
        &self,
        addr: ResourceAddress,
        policy: Option<Arc<dyn ConcretePolicy>>,
    ) -> ResourceExpander {
        let expander = ResourceExpander::new(addr, Arc::new(self.schema.clone()))
            .with_repetition(self.repetition());
        match policy {
            Some(policy) => expander.with_policy(policy),
            None => expander,
        }
    }
}

pub fn from_yaml_str(content: &str) -> ExpandResult<ExpansionFile> {
    let file: ExpansionFile = serde_yaml::from_str(content)?;
    validate_file(&file)?;
    Ok(file)
}

pub fn from_json_str(content: &str) -> ExpandResult<ExpansionFile> {
    let file: ExpansionFile = serde_json::from_str(content)?;
    validate_file(&file)?;
    Ok(file)
}

pub fn load_yaml(path: &Path) -> ExpandResult<ExpansionFile> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn load_json(path: &Path) -> ExpandResult<ExpansionFile> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

/// Load by extension: `.json` is JSON, anything else YAML.
pub fn load(path: &Path) -> ExpandResult<ExpansionFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

pub fn save_yaml(path: &Path, file: &ExpansionFile) -> ExpandResult<()> {
    validate_file(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}
