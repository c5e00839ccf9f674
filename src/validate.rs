//! Validation hook run on the parsed tree before flattening.

use crate::node::Node;
use serde::Serialize;
use std::fmt;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Dotted document path the failure refers to.
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn missing(path: &str) -> Self {
        Self::new(path, "required value is missing")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Checks a parsed document. An empty result means the document is accepted.
pub trait Validator {
    fn validate(&self, root: &Node) -> Vec<ValidationError>;
}

/// Accepts every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValidation;

impl Validator for NoValidation {
    fn validate(&self, _root: &Node) -> Vec<ValidationError> {
        Vec::new()
    }
}

/// Requires each dotted path to be present with a non-null value.
#[derive(Debug, Clone, Default)]
pub struct RequiredPaths {
    paths: Vec<String>,
}

impl RequiredPaths {
    pub fn new<S: Into<String>>(paths: impl IntoIterator<Item = S>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for RequiredPaths {
    fn validate(&self, root: &Node) -> Vec<ValidationError> {
        self.paths
            .iter()
            .filter(|path| matches!(root.lookup(path), None | Some(Node::Null)))
            .map(|path| ValidationError::missing(path))
            .collect()
    }
}
