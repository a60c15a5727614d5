//! Token trees
//!
//! A token document is a tree of groups and leaves. Groups are plain JSON
//! objects; a leaf is either a raw value or a wrapper object carrying
//! `$value` (plus optional `$type` / `$description` metadata).

use crate::error::{Result, TokenError};
use crate::value::TokenValue;
use indexmap::IndexMap;

/// A single token definition
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub value: TokenValue,
    /// Declared `$type`, if any
    pub kind: Option<String>,
    pub description: Option<String>,
}

impl Token {
    /// A raw (unwrapped) token value
    pub fn raw(value: impl Into<TokenValue>) -> Self {
        Self {
            value: value.into(),
            kind: None,
            description: None,
        }
    }
}

/// A node in a token tree
#[derive(Clone, Debug, PartialEq)]
pub enum TokenNode {
    Group(TokenTree),
    Leaf(Token),
}

impl TokenNode {
    /// The value this node stands for.
    ///
    /// Leaves yield their (unwrapped) value; groups yield an object of their
    /// children's values, so a reference may target a whole group.
    pub fn to_value(&self) -> TokenValue {
        match self {
            TokenNode::Leaf(token) => token.value.clone(),
            TokenNode::Group(tree) => tree.to_value(),
        }
    }

    fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(mut map) => match map.remove("$value") {
                Some(inner) => TokenNode::Leaf(Token {
                    value: inner.into(),
                    kind: take_string(&mut map, "$type"),
                    description: take_string(&mut map, "$description"),
                }),
                None => TokenNode::Group(TokenTree::from_json_map(map)),
            },
            other => TokenNode::Leaf(Token::raw(other)),
        }
    }
}

fn take_string(map: &mut serde_json::Map<String, serde_json::Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    }
}

/// A named, nested collection of tokens
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenTree {
    children: IndexMap<String, TokenNode>,
    /// Group-level `$type`, inherited by nothing; kept for inspection
    kind: Option<String>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON token document. The root must be an object.
    pub fn from_json_str(name: &str, src: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(src).map_err(|error| TokenError::Json {
                source_name: name.to_string(),
                error,
            })?;
        Self::from_json(name, value)
    }

    /// Build a tree from an already-parsed JSON document
    pub fn from_json(name: &str, value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) if !map.contains_key("$value") => {
                Ok(Self::from_json_map(map))
            }
            _ => Err(TokenError::InvalidRoot(name.to_string())),
        }
    }

    fn from_json_map(mut map: serde_json::Map<String, serde_json::Value>) -> Self {
        let kind = take_string(&mut map, "$type");
        let children = map
            .into_iter()
            // Remaining `$` keys are group metadata, not tokens
            .filter(|(key, _)| !key.starts_with('$'))
            .map(|(key, value)| (key, TokenNode::from_json(value)))
            .collect();
        Self { children, kind }
    }

    /// Add or replace a child node
    pub fn insert(&mut self, key: impl Into<String>, node: TokenNode) {
        self.children.insert(key.into(), node);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, node: TokenNode) -> Self {
        self.insert(key, node);
        self
    }

    /// Builder-style insert of a raw leaf
    pub fn with_leaf(self, key: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.with(key, TokenNode::Leaf(Token::raw(value)))
    }

    /// Builder-style insert of a nested group
    pub fn with_group(self, key: impl Into<String>, group: TokenTree) -> Self {
        self.with(key, TokenNode::Group(group))
    }

    pub fn child(&self, key: &str) -> Option<&TokenNode> {
        self.children.get(key)
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Walk a dotted path through nested groups.
    ///
    /// Fails closed: `None` if any segment is missing or a leaf is reached
    /// before the last segment.
    pub fn lookup(&self, path: &str) -> Option<&TokenNode> {
        let mut segments = path.split('.');
        let mut node = self.children.get(segments.next()?)?;
        for segment in segments {
            match node {
                TokenNode::Group(group) => node = group.children.get(segment)?,
                TokenNode::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    /// Object value of every child, keyed by name
    pub fn to_value(&self) -> TokenValue {
        TokenValue::Object(
            self.children
                .iter()
                .map(|(k, node)| (k.clone(), node.to_value()))
                .collect(),
        )
    }
}
