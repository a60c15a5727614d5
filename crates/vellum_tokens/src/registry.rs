//! Source registry
//!
//! The registry is an ordered list of named token trees. Order is search
//! priority: when a dotted path exists in several sources, the first source
//! in the list wins and nothing is merged.

use crate::error::{Result, TokenError};
use crate::tree::{TokenNode, TokenTree};
use std::path::Path;

/// Name of the shared alias source (semantic names over core palettes)
pub const ALIAS: &str = "alias";
/// Name of the shared core source (raw palettes and scales)
pub const CORE: &str = "core";
/// Name of the light theme source
pub const LIGHT: &str = "light";
/// Name of the dark theme source
pub const DARK: &str = "dark";
/// Name of the web component source (shadows, composite borders)
pub const WEB: &str = "web";

/// Search priority of the built-in sources.
///
/// `light` is searched before `dark`, so a reference to a theme-only path
/// from a shared source always lands in the light tree. Shared sources
/// should reference `alias`/`core` paths only.
pub const BUILTIN_PRIORITY: [&str; 5] = [ALIAS, CORE, LIGHT, DARK, WEB];

const ALIAS_JSON: &str = include_str!("../tokens/alias.json");
const CORE_JSON: &str = include_str!("../tokens/core.json");
const LIGHT_JSON: &str = include_str!("../tokens/theme/light.json");
const DARK_JSON: &str = include_str!("../tokens/theme/dark.json");
const WEB_JSON: &str = include_str!("../tokens/web.json");

/// Ordered, read-only collection of token sources
#[derive(Clone, Debug, Default)]
pub struct SourceRegistry {
    sources: Vec<(String, TokenTree)>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in token set, in [`BUILTIN_PRIORITY`] order
    pub fn builtin() -> Result<Self> {
        let docs = [
            (ALIAS, ALIAS_JSON),
            (CORE, CORE_JSON),
            (LIGHT, LIGHT_JSON),
            (DARK, DARK_JSON),
            (WEB, WEB_JSON),
        ];
        let mut registry = Self::new();
        for (name, src) in docs {
            registry.push_json(name, src)?;
        }
        tracing::debug!("loaded {} built-in token sources", registry.len());
        Ok(registry)
    }

    /// Append a source at the lowest priority
    pub fn push(&mut self, name: impl Into<String>, tree: TokenTree) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(TokenError::DuplicateSource(name));
        }
        self.sources.push((name, tree));
        Ok(())
    }

    /// Builder-style [`push`](Self::push)
    pub fn with_source(mut self, name: impl Into<String>, tree: TokenTree) -> Result<Self> {
        self.push(name, tree)?;
        Ok(self)
    }

    /// Parse a JSON document and append it at the lowest priority
    pub fn push_json(&mut self, name: &str, src: &str) -> Result<()> {
        let tree = TokenTree::from_json_str(name, src)?;
        self.push(name, tree)
    }

    /// Read a JSON document from disk and append it at the lowest priority
    pub fn push_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let src = std::fs::read_to_string(path).map_err(|error| TokenError::Io {
            path: path.display().to_string(),
            error,
        })?;
        self.push_json(name, &src)
    }

    /// A source by name
    pub fn get(&self, name: &str) -> Option<&TokenTree> {
        self.sources
            .iter()
            .find(|(source, _)| source == name)
            .map(|(_, tree)| tree)
    }

    /// Source names in priority order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|(name, _)| name.as_str())
    }

    /// Sources in priority order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenTree)> {
        self.sources.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    /// First node at `path`, searching sources in priority order
    pub fn find(&self, path: &str) -> Option<(&str, &TokenNode)> {
        self.iter()
            .find_map(|(name, tree)| tree.lookup(path).map(|node| (name, node)))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TokenValue;

    #[test]
    fn builtin_sources_load_in_priority_order() {
        let registry = SourceRegistry::builtin().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, BUILTIN_PRIORITY);
    }

    #[test]
    fn first_source_wins() {
        let registry = SourceRegistry::new()
            .with_source("a", TokenTree::new().with_leaf("color", "#aaaaaa"))
            .unwrap()
            .with_source("b", TokenTree::new().with_leaf("color", "#bbbbbb"))
            .unwrap();
        let (name, node) = registry.find("color").unwrap();
        assert_eq!(name, "a");
        assert_eq!(node.to_value(), TokenValue::from("#aaaaaa"));
    }

    #[test]
    fn partial_match_falls_through_to_next_source() {
        let registry = SourceRegistry::new()
            .with_source(
                "a",
                TokenTree::new().with_group("radius", TokenTree::new().with_leaf("input", "{radius.m}")),
            )
            .unwrap()
            .with_source(
                "b",
                TokenTree::new().with_group("radius", TokenTree::new().with_leaf("m", "8px")),
            )
            .unwrap();
        let (name, _) = registry.find("radius.m").unwrap();
        assert_eq!(name, "b");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = SourceRegistry::new()
            .with_source("core", TokenTree::new())
            .unwrap()
            .with_source("core", TokenTree::new());
        assert!(matches!(result, Err(TokenError::DuplicateSource(name)) if name == "core"));
    }
}
