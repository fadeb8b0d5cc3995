//! Generic document tree exchanged with the renderer.
//!
//! The renderer's intermediate representation is pandoc JSON: objects carry
//! a `t` discriminator and their payload under `c`. [`Node`] models it as a
//! closed variant so passes over the tree are plain pattern matches.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Leaf value of the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// A node of the generic document tree.
///
/// Serializes to the same JSON it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Object(BTreeMap<String, Node>),
}

impl Node {
    /// Parse a tree from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice::<Value>(bytes).map(Self::from)
    }

    /// Serialize the tree to compact JSON.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Shorthand for a string scalar.
    pub fn string(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(s.into()))
    }

    /// String value if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Member `key` if this is an object.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Mutable member `key` if this is an object.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Self> {
        match self {
            Self::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    /// The `t` discriminator of a pandoc element, if any.
    pub fn tag(&self) -> Option<&str> {
        self.get("t").and_then(Self::as_str)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Scalar(Scalar::Null) => Self::Null,
            Node::Scalar(Scalar::Bool(b)) => Self::Bool(b),
            Node::Scalar(Scalar::Number(n)) => Self::Number(n),
            Node::Scalar(Scalar::String(s)) => Self::String(s),
            Node::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Node::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_pandoc_link() {
        let raw = br#"{"t":"Link","c":[["",[],[]],[{"t":"Str","c":"x"}],["pages/a.html",""]]}"#;
        let node = Node::from_json(raw).unwrap();

        assert_eq!(node.tag(), Some("Link"));
        let Some(Node::Sequence(c)) = node.get("c") else {
            panic!("expected sequence");
        };
        assert_eq!(c.len(), 3);
        let Node::Sequence(target) = &c[2] else {
            panic!("expected target pair");
        };
        assert_eq!(target[0].as_str(), Some("pages/a.html"));
    }

    #[test]
    fn test_value_conversion_preserves_scalars() {
        let value = json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {},
            "blocks": [null, true, 1.5, "s"]
        });
        let node = Node::from(value.clone());
        assert_eq!(Value::from(node), value);
    }

    #[test]
    fn test_to_json_is_parseable() {
        let node = Node::Object(BTreeMap::from([
            ("t".to_string(), Node::string("Para")),
            ("c".to_string(), Node::Sequence(vec![])),
        ]));
        let bytes = node.to_json().unwrap();
        assert_eq!(Node::from_json(&bytes).unwrap(), node);
    }

    #[test]
    fn test_to_json_matches_value_encoding() {
        let raw = br#"{"blocks":[{"c":[{"c":"x","t":"Str"},{"t":"Space"}],"t":"Para"}],"meta":{"n":null,"ok":false},"pandoc-api-version":[1,23,1.5]}"#;
        let node = Node::from_json(raw).unwrap();

        let direct = node.to_json().unwrap();
        assert_eq!(direct, raw.to_vec());
        assert_eq!(direct, serde_json::to_vec(&Value::from(node)).unwrap());
    }

    #[test]
    fn test_accessors_on_wrong_variant() {
        let node = Node::Sequence(vec![]);
        assert!(node.get("t").is_none());
        assert!(node.tag().is_none());
        assert!(node.as_str().is_none());
        assert!(Node::from_json(b"{not json").is_err());
    }
}
