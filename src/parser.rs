//! Document parsing into the typed tree.

use crate::error::{LoadError, Result};
use crate::node::Node;
use serde_yaml::Value;

/// Parses raw document text into a [`Node`] tree.
pub trait DocumentParser {
    /// Parse `source`; malformed input fails with [`LoadError::DocumentParse`].
    fn parse(&self, source: &str) -> Result<Node>;
}

/// YAML parser backed by `serde_yaml`.
///
/// A document whose root is null (empty, comments only, or `~`) parses to
/// an empty mapping. Tags are dropped in favour of the tagged value.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl DocumentParser for YamlParser {
    fn parse(&self, source: &str) -> Result<Node> {
        if is_blank(source) {
            return Ok(Node::empty_mapping());
        }
        let value: Value = serde_yaml::from_str(source)?;
        match convert(value, "")? {
            Node::Null => Ok(Node::empty_mapping()),
            node => Ok(node),
        }
    }
}

fn is_blank(source: &str) -> bool {
    source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn convert(value: Value, path: &str) -> Result<Node> {
    Ok(match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(b),
        Value::Number(n) => number(&n),
        Value::String(s) => Node::String(s),
        Value::Sequence(items) => Node::Sequence(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| convert(item, &child_path(path, &i.to_string())))
                .collect::<Result<_>>()?,
        ),
        Value::Mapping(mapping) => {
            let mut entries: Vec<(String, Node)> = Vec::with_capacity(mapping.len());
            for (key, child) in mapping {
                let key = key_segment(key, path)?;
                let child = convert(child, &child_path(path, &key))?;
                // `1:` and `"1":` are distinct YAML keys but the same segment
                match entries.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = child,
                    None => entries.push((key, child)),
                }
            }
            Node::Mapping(entries)
        }
        Value::Tagged(tagged) => convert(tagged.value, path)?,
    })
}

fn number(n: &serde_yaml::Number) -> Node {
    if let Some(i) = n.as_i64() {
        Node::Integer(i.into())
    } else if let Some(u) = n.as_u64() {
        Node::Integer(u.into())
    } else {
        Node::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Turn a mapping key into a path segment.
fn key_segment(key: Value, path: &str) -> Result<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Tagged(tagged) => key_segment(tagged.value, path),
        Value::Sequence(_) => Err(LoadError::UnsupportedKey {
            path: display_path(path),
            found: "sequence",
        }),
        Value::Mapping(_) => Err(LoadError::UnsupportedKey {
            path: display_path(path),
            found: "mapping",
        }),
    }
}

fn child_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Node> {
        YamlParser.parse(source)
    }

    #[test]
    fn test_parse_typed_scalars() {
        let root = parse(
            "string_value: hello world\ninteger_value: 42\nfloat_value: 2.75\n\
             boolean_true: true\nnull_value: null\nempty_string: \"\"\n",
        )
        .unwrap();
        assert_eq!(
            root.get("string_value"),
            Some(&Node::String("hello world".into()))
        );
        assert_eq!(root.get("integer_value"), Some(&Node::Integer(42)));
        assert_eq!(root.get("float_value"), Some(&Node::Float(2.75)));
        assert_eq!(root.get("boolean_true"), Some(&Node::Bool(true)));
        assert_eq!(root.get("null_value"), Some(&Node::Null));
        assert_eq!(root.get("empty_string"), Some(&Node::String(String::new())));
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let root = parse("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let Node::Mapping(entries) = root else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_large_unsigned_integer() {
        let root = parse("big: 18446744073709551615\n").unwrap();
        assert_eq!(root.get("big"), Some(&Node::Integer(u64::MAX.into())));
    }

    #[test]
    fn test_empty_document_is_empty_mapping() {
        assert_eq!(parse("").unwrap(), Node::empty_mapping());
        assert_eq!(parse("# only a comment\n").unwrap(), Node::empty_mapping());
        assert_eq!(parse("~").unwrap(), Node::empty_mapping());
    }

    #[test]
    fn test_scalar_root_is_returned_as_is() {
        assert_eq!(parse("just text").unwrap(), Node::String("just text".into()));
    }

    #[test]
    fn test_unbalanced_sequence_is_parse_error() {
        let err = parse("items: [one, two\nother: 1\n").unwrap_err();
        match err {
            LoadError::DocumentParse { message, .. } => assert!(!message.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tags_are_transparent() {
        let root = parse("host: !secret localhost\n").unwrap();
        assert_eq!(root.get("host"), Some(&Node::String("localhost".into())));
    }

    #[test]
    fn test_scalar_keys_become_segments() {
        let root = parse("8080: http\ntrue: yes\n").unwrap();
        assert_eq!(root.get("8080"), Some(&Node::String("http".into())));
        assert_eq!(root.get("true"), Some(&Node::String("yes".into())));
    }

    #[test]
    fn test_collection_key_is_rejected() {
        let err = parse("outer:\n  ? [a, b]\n  : value\n").unwrap_err();
        match err {
            LoadError::UnsupportedKey { path, found } => {
                assert_eq!(path, "outer");
                assert_eq!(found, "sequence");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
