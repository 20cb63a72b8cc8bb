//! Resource and resource-instance addressing.
//!
//! Addresses render the way they are written in configuration and plan output:
//!
//! ```text
//! module.network["east"].data.aws_subnet.private[2]
//! ```
//!
//! and parse back from the same grammar.

use core::fmt;
use core::str::FromStr;

use crate::error::{RxError, RxResult};

/// Identifies one instance of a repeated object.
///
/// Key variants never mix within one expansion: count yields `Int`,
/// for-each yields `Str`, and an unrepeated object has `NoKey`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum InstanceKey {
    /// No repetition configured.
    #[default]
    NoKey,
    /// 0-based count index.
    Int(i64),
    /// for-each map key.
    Str(String),
}

impl InstanceKey {
    pub fn is_no_key(&self) -> bool {
        matches!(self, InstanceKey::NoKey)
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceKey::NoKey => Ok(()),
            InstanceKey::Int(i) => write!(f, "[{}]", i),
            InstanceKey::Str(s) => {
                f.write_str("[\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"]")
            }
        }
    }
}

impl From<i64> for InstanceKey {
    fn from(i: i64) -> Self {
        InstanceKey::Int(i)
    }
}

impl From<&str> for InstanceKey {
    fn from(s: &str) -> Self {
        InstanceKey::Str(s.to_string())
    }
}

impl From<String> for InstanceKey {
    fn from(s: String) -> Self {
        InstanceKey::Str(s)
    }
}

/// Managed resources are created by the engine; data resources are only read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ResourceMode {
    #[default]
    Managed,
    Data,
}

/// One `module.NAME[KEY]` hop in a module instance path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleInstanceStep {
    pub name: String,
    pub key: InstanceKey,
}

/// Path from the root module to a module instance. Empty means root.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ModuleInstance(Vec<ModuleInstanceStep>);

impl ModuleInstance {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the path extended by one child module instance.
    pub fn child(mut self, name: impl Into<String>, key: InstanceKey) -> Self {
        self.0.push(ModuleInstanceStep {
            name: name.into(),
            key,
        });
        self
    }

    pub fn steps(&self) -> &[ModuleInstanceStep] {
        &self.0
    }
}

impl fmt::Display for ModuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "module.{}{}", step.name, step.key)?;
        }
        Ok(())
    }
}

/// Address of a resource declaration, independent of repetition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceAddress {
    module: ModuleInstance,
    mode: ResourceMode,
    type_name: String,
    name: String,
}

impl ResourceAddress {
    /// A managed resource in the root module.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: ModuleInstance::root(),
            mode: ResourceMode::Managed,
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// A data resource in the root module.
    pub fn data(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mode: ResourceMode::Data,
            ..Self::new(type_name, name)
        }
    }

    /// Move this address into the given module instance.
    pub fn in_module(self, module: ModuleInstance) -> Self {
        Self { module, ..self }
    }

    pub fn module(&self) -> &ModuleInstance {
        &self.module
    }

    pub fn mode(&self) -> ResourceMode {
        self.mode
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Address of one instance of this resource.
    pub fn instance(&self, key: InstanceKey) -> ResourceInstanceAddress {
        ResourceInstanceAddress {
            resource: self.clone(),
            key,
        }
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.module.is_root() {
            write!(f, "{}.", self.module)?;
        }
        if self.mode == ResourceMode::Data {
            f.write_str("data.")?;
        }
        write!(f, "{}.{}", self.type_name, self.name)
    }
}

impl FromStr for ResourceAddress {
    type Err = RxError;

    fn from_str(s: &str) -> RxResult<Self> {
        let (resource, key) = parse_resource(s)?;
        if !key.is_no_key() {
            return Err(invalid(s, "resource address must not carry an instance key"));
        }
        Ok(resource)
    }
}

/// Address of one resource instance: the vertex identity in the graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceInstanceAddress {
    resource: ResourceAddress,
    key: InstanceKey,
}

impl ResourceInstanceAddress {
    pub fn resource(&self) -> &ResourceAddress {
        &self.resource
    }

    pub fn key(&self) -> &InstanceKey {
        &self.key
    }
}

impl fmt::Display for ResourceInstanceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.resource, self.key)
    }
}

impl FromStr for ResourceInstanceAddress {
    type Err = RxError;

    fn from_str(s: &str) -> RxResult<Self> {
        let (resource, key) = parse_resource(s)?;
        Ok(resource.instance(key))
    }
}

fn invalid(input: &str, reason: &'static str) -> RxError {
    RxError::InvalidAddress {
        input: input.to_string(),
        reason,
    }
}

fn parse_resource(input: &str) -> RxResult<(ResourceAddress, InstanceKey)> {
    let segments = split_segments(input)?;
    let mut rest = segments.as_slice();

    let mut module = ModuleInstance::root();
    while rest.len() > 2 && rest[0] == "module" {
        let (name, key) = split_key(input, rest[1])?;
        module = module.child(name, key);
        rest = &rest[2..];
    }

    let mut mode = ResourceMode::Managed;
    if rest.len() == 3 && rest[0] == "data" {
        mode = ResourceMode::Data;
        rest = &rest[1..];
    }

    let [type_name, name] = rest else {
        return Err(invalid(input, "expected TYPE.NAME after module path"));
    };
    if !is_identifier(type_name) {
        return Err(invalid(input, "resource type is not a valid identifier"));
    }
    if matches!(*type_name, "module" | "data") {
        return Err(invalid(input, "resource type uses a reserved keyword"));
    }
    let (name, key) = split_key(input, name)?;

    let resource = ResourceAddress {
        module,
        mode,
        type_name: type_name.to_string(),
        name: name.to_string(),
    };
    Ok((resource, key))
}

/// Split on `.` outside of `[...]` and quoted strings.
fn split_segments(input: &str) -> RxResult<Vec<&str>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_brackets = false;
    let mut in_quote = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if in_quote {
            match (escaped, c) {
                (true, _) => escaped = false,
                (false, '\\') => escaped = true,
                (false, '"') => in_quote = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' if in_brackets => in_quote = true,
            '[' if !in_brackets => in_brackets = true,
            ']' if in_brackets => in_brackets = false,
            '.' if !in_brackets => {
                segments.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if in_quote || in_brackets {
        return Err(invalid(input, "unterminated instance key"));
    }
    segments.push(&input[start..]);
    Ok(segments)
}

/// Split `name[key]` into its name and key.
fn split_key<'a>(input: &str, segment: &'a str) -> RxResult<(&'a str, InstanceKey)> {
    let Some(open) = segment.find('[') else {
        if !is_identifier(segment) {
            return Err(invalid(input, "name is not a valid identifier"));
        }
        return Ok((segment, InstanceKey::NoKey));
    };
    let name = &segment[..open];
    if !is_identifier(name) {
        return Err(invalid(input, "name is not a valid identifier"));
    }
    let Some(inner) = segment[open + 1..].strip_suffix(']') else {
        return Err(invalid(input, "unexpected characters after instance key"));
    };
    Ok((name, parse_key(input, inner)?))
}

fn parse_key(input: &str, inner: &str) -> RxResult<InstanceKey> {
    if let Some(quoted) = inner.strip_prefix('"') {
        let Some(body) = quoted.strip_suffix('"') else {
            return Err(invalid(input, "unterminated string key"));
        };
        let mut key = String::with_capacity(body.len());
        let mut chars = body.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(e @ ('"' | '\\')) => key.push(e),
                    _ => return Err(invalid(input, "unsupported escape in string key")),
                },
                '"' => return Err(invalid(input, "unescaped quote in string key")),
                c => key.push(c),
            }
        }
        return Ok(InstanceKey::Str(key));
    }

    if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(input, "instance key must be an integer or a quoted string"));
    }
    inner
        .parse::<i64>()
        .map(InstanceKey::Int)
        .map_err(|_| invalid(input, "integer key out of range"))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn string_keys_survive_rendering(key in "\\PC*") {
            let addr = ResourceAddress::new("null_resource", "each")
                .instance(InstanceKey::from(key.as_str()));
            let parsed: ResourceInstanceAddress = addr.to_string().parse().unwrap();
            prop_assert_eq!(parsed, addr);
        }
    }
}
