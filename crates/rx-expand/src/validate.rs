//! Resource file validation.
//!
//! Expansion itself accepts any repetition arguments. This layer rejects the
//! configurations that would produce surprising graphs before they get there.

use std::collections::HashSet;

use rx_core::{ResourceAddress, RxError};

use crate::config::{ExpansionFile, LATEST_VERSION, ResourceDef};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid resource address: {source}")]
    InvalidAddress {
        #[from]
        source: RxError,
    },

    #[error("{address}: resource count must be non-negative, got {count}")]
    NegativeCount { address: String, count: i64 },

    #[error("{address}: count and for_each cannot both be set")]
    CountAndForEach { address: String },

    #[error("Duplicate resource address: {address}")]
    DuplicateAddress { address: String },
}

pub fn validate_file(file: &ExpansionFile) -> Result<(), ValidationError> {
    if file.version == 0 || file.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }
    validate_resources(&file.resources)?;
    Ok(())
}

/// Validate every definition and check that no address is declared twice.
pub fn validate_resources(
    resources: &[ResourceDef],
) -> Result<Vec<ResourceAddress>, ValidationError> {
    let mut seen = HashSet::new();
    let mut addrs = Vec::with_capacity(resources.len());
    for def in resources {
        let addr = validate_resource(def)?;
        if !seen.insert(addr.clone()) {
            return Err(ValidationError::DuplicateAddress {
                address: addr.to_string(),
            });
        }
        addrs.push(addr);
    }
    Ok(addrs)
}

/// Validate one definition, returning its parsed address.
pub fn validate_resource(def: &ResourceDef) -> Result<ResourceAddress, ValidationError> {
    let addr: ResourceAddress = def.address.parse()?;

    if let Some(count) = def.count {
        if count < 0 {
            return Err(ValidationError::NegativeCount {
                address: addr.to_string(),
                count,
            });
        }
    }
    if def.repetition().has_conflict() {
        return Err(ValidationError::CountAndForEach {
            address: addr.to_string(),
        });
    }

    Ok(addr)
}
