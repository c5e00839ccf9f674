//! Flattening of a document tree into environment variable names.
//!
//! Mapping keys become upper-cased segments joined with `_`:
//! `database.credentials.username` becomes `DATABASE_CREDENTIALS_USERNAME`.
//! Anything that is not a mapping ends a path and is emitted as a leaf.

use crate::error::{LoadError, Result};
use crate::node::Node;
use std::collections::BTreeMap;
use tracing::warn;

/// Separator between flat key segments.
pub const SEPARATOR: char = '_';

/// Flatten `root` into flat keys mapped to their leaf nodes.
///
/// A non-empty `prefix` is upper-cased and added as a leading segment.
/// When two distinct paths produce the same flat key (`a_b` next to
/// `a: {b: ..}`), the path visited later in document order wins.
pub fn flatten<'a>(root: &'a Node, prefix: &str) -> Result<BTreeMap<String, &'a Node>> {
    let Node::Mapping(entries) = root else {
        return Err(LoadError::InvalidDocumentShape { found: root.kind() });
    };

    let mut out = BTreeMap::new();
    let base = prefix.to_uppercase();
    for (key, child) in entries {
        walk(&join(&base, key), child, &mut out);
    }
    Ok(out)
}

fn walk<'a>(path: &str, node: &'a Node, out: &mut BTreeMap<String, &'a Node>) {
    match node {
        Node::Mapping(entries) => {
            for (key, child) in entries {
                walk(&join(path, key), child, out);
            }
        }
        leaf => {
            if out.insert(path.to_string(), leaf).is_some() {
                warn!(key = %path, "Flat key produced by more than one path, keeping the later one");
            }
        }
    }
}

fn join(base: &str, segment: &str) -> String {
    let segment = segment.to_uppercase();
    if base.is_empty() {
        segment
    } else {
        format!("{}{}{}", base, SEPARATOR, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: Vec<(&str, Node)>) -> Node {
        Node::Mapping(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    fn keys(flat: &BTreeMap<String, &Node>) -> Vec<String> {
        flat.keys().cloned().collect()
    }

    #[test]
    fn test_flatten_nested_paths() {
        let root = map(vec![
            (
                "database",
                map(vec![
                    ("host", Node::String("localhost".into())),
                    (
                        "credentials",
                        map(vec![("username", Node::String("admin".into()))]),
                    ),
                ]),
            ),
            ("api_key", Node::String("secret123".into())),
        ]);
        let flat = flatten(&root, "").unwrap();
        assert_eq!(
            keys(&flat),
            vec![
                "API_KEY",
                "DATABASE_CREDENTIALS_USERNAME",
                "DATABASE_HOST"
            ]
        );
        assert_eq!(flat["DATABASE_HOST"], &Node::String("localhost".into()));
    }

    #[test]
    fn test_flatten_with_prefix() {
        let root = map(vec![(
            "database",
            map(vec![
                ("host", Node::String("localhost".into())),
                ("port", Node::Integer(5432)),
            ]),
        )]);
        let flat = flatten(&root, "myapp").unwrap();
        assert_eq!(
            keys(&flat),
            vec!["MYAPP_DATABASE_HOST", "MYAPP_DATABASE_PORT"]
        );
    }

    #[test]
    fn test_sequences_are_leaves() {
        let root = map(vec![(
            "simple_list",
            Node::Sequence(vec![Node::String("item1".into())]),
        )]);
        let flat = flatten(&root, "").unwrap();
        assert!(matches!(flat["SIMPLE_LIST"], Node::Sequence(_)));
    }

    #[test]
    fn test_empty_mappings_contribute_nothing() {
        let root = map(vec![
            ("empty", map(vec![])),
            ("nested", map(vec![("also_empty", map(vec![]))])),
        ]);
        assert!(flatten(&root, "").unwrap().is_empty());
        assert!(flatten(&Node::empty_mapping(), "APP").unwrap().is_empty());
    }

    #[test]
    fn test_scalar_root_is_rejected() {
        let err = flatten(&Node::String("just text".into()), "").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidDocumentShape { found: "string" }
        ));
        assert!(matches!(
            flatten(&Node::Sequence(vec![]), ""),
            Err(LoadError::InvalidDocumentShape { found: "sequence" })
        ));
    }

    #[test]
    fn test_collision_later_path_wins() {
        let root = map(vec![
            ("a_b", Node::String("flat".into())),
            ("a", map(vec![("b", Node::String("nested".into()))])),
        ]);
        let flat = flatten(&root, "").unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["A_B"], &Node::String("nested".into()));

        let reversed = map(vec![
            ("a", map(vec![("b", Node::String("nested".into()))])),
            ("a_b", Node::String("flat".into())),
        ]);
        let flat = flatten(&reversed, "").unwrap();
        assert_eq!(flat["A_B"], &Node::String("flat".into()));
    }

    #[test]
    fn test_case_folding_collision_follows_order() {
        let root = map(vec![
            ("Host", Node::String("first".into())),
            ("host", Node::String("second".into())),
        ]);
        let flat = flatten(&root, "").unwrap();
        assert_eq!(flat["HOST"], &Node::String("second".into()));
    }
}
