//! Error types for loading and expanding resource files.

use rx_graph::GraphError;
use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that can occur between reading a resource file and a finished graph.
#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExpandResult<T> = Result<T, ExpandError>;
