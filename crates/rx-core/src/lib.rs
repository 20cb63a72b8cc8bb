//! rx-core: stable foundation for rexpand.
//!
//! Contains:
//! - addrs (resource and resource-instance addresses, instance keys)
//! - schema (block descriptors attached to instance nodes)
//! - error (shared error types)

pub mod addrs;
pub mod error;
pub mod schema;

// Re-exports: nice ergonomics for downstream crates
pub use addrs::*;
pub use error::{RxError, RxResult};
pub use schema::{Attribute, AttributeType, Block, NestedBlock, NestingMode};

/// Fully resolved configuration value (for-each map values).
pub use serde_json::Value;
