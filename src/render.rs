//! Rendering of leaf values into environment variable strings.
//!
//! - Null renders as the empty string
//! - Booleans render as `true` / `false`
//! - Numbers render in the YAML parser's canonical form
//! - Sequences render their scalar elements joined with `,`

use crate::error::{LoadError, Result};
use crate::node::Node;

/// Render a leaf node stored under `key`.
///
/// `key` is only used to report an unsupported shape. Sequences may only
/// contain scalars; a nested sequence or mapping fails with
/// [`LoadError::UnsupportedValueShape`].
pub fn render(key: &str, node: &Node) -> Result<String> {
    match node {
        Node::Sequence(items) => {
            let rendered = items
                .iter()
                .map(|item| {
                    render_scalar(item).ok_or_else(|| LoadError::UnsupportedValueShape {
                        key: key.to_string(),
                        found: item.kind(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(rendered.join(","))
        }
        Node::Mapping(_) => Err(LoadError::UnsupportedValueShape {
            key: key.to_string(),
            found: node.kind(),
        }),
        scalar => Ok(render_scalar(scalar).unwrap_or_default()),
    }
}

/// Render a scalar node; `None` for sequences and mappings.
pub fn render_scalar(node: &Node) -> Option<String> {
    match node {
        Node::Null => Some(String::new()),
        Node::Bool(b) => Some(b.to_string()),
        Node::Integer(i) => Some(i.to_string()),
        Node::Float(f) => Some(serde_yaml::Number::from(*f).to_string()),
        Node::String(s) => Some(s.clone()),
        Node::Sequence(_) | Node::Mapping(_) => None,
    }
}
