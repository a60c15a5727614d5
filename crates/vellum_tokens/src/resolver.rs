//! Reference resolution
//!
//! Follows `{dotted.path}` references across the registry until a literal is
//! reached. A path that no source defines is simply undefined; a path that is
//! revisited within one resolution is a cycle, reported with a warning and
//! also treated as undefined.

use crate::registry::SourceRegistry;
use crate::value::TokenValue;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::RwLock;

/// Paths already visited while following one reference chain
pub type Visited = FxHashSet<String>;

/// A memoized resolution: the terminal value and every path its chain
/// walked, starting with the resolved path itself
#[derive(Clone, Debug)]
struct Cached {
    value: TokenValue,
    chain: Vec<String>,
}

/// Resolves dotted paths against a [`SourceRegistry`]
pub struct Resolver<'a> {
    registry: &'a SourceRegistry,
    /// Successful resolutions keyed by path.
    /// The registry never changes, so entries never go stale.
    cache: RwLock<FxHashMap<String, Cached>>,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a SourceRegistry) -> Self {
        Self {
            registry,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn registry(&self) -> &'a SourceRegistry {
        self.registry
    }

    /// Resolve a dotted path with a fresh visited set
    pub fn resolve(&self, path: &str) -> Option<TokenValue> {
        self.resolve_with(path, &mut Visited::default())
    }

    /// Resolve a dotted path, recording every path on the chain in `visited`.
    ///
    /// Returns `None` when no source defines the path or when the chain
    /// revisits a path. An explicit `null` token resolves to
    /// `Some(TokenValue::Null)`. The result never depends on what was
    /// resolved earlier through the same resolver.
    pub fn resolve_with(&self, path: &str, visited: &mut Visited) -> Option<TokenValue> {
        self.resolve_chain(path, visited).map(|cached| cached.value)
    }

    fn resolve_chain(&self, path: &str, visited: &mut Visited) -> Option<Cached> {
        if visited.contains(path) {
            tracing::warn!("Circular reference: {}", path);
            return None;
        }

        // A hit stands in for walking its chain, so it only applies when
        // that walk would not have revisited anything.
        if let Some(hit) = self.cached(path) {
            if !hit.chain.iter().any(|p| visited.contains(p)) {
                visited.extend(hit.chain.iter().cloned());
                return Some(hit);
            }
        }
        visited.insert(path.to_string());

        let Some((source, node)) = self.registry.find(path) else {
            tracing::trace!("token `{}` not defined in any source", path);
            return None;
        };
        tracing::trace!("token `{}` found in `{}`", path, source);

        let value = node.to_value();
        let resolved = match value.as_reference() {
            Some(target) => {
                let mut next = self.resolve_chain(target, visited)?;
                next.chain.insert(0, path.to_string());
                next
            }
            None => Cached {
                value,
                chain: vec![path.to_string()],
            },
        };

        self.cache
            .write()
            .unwrap()
            .insert(path.to_string(), resolved.clone());
        Some(resolved)
    }

    fn cached(&self, path: &str) -> Option<Cached> {
        self.cache.read().unwrap().get(path).cloned()
    }

    /// Drop every memoized path
    pub fn clear_cache(&self) {
        self.cache.write().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TokenTree;
    use pretty_assertions::assert_eq;

    fn registry(tree: TokenTree) -> SourceRegistry {
        SourceRegistry::new().with_source("test", tree).unwrap()
    }

    #[test]
    fn literal_resolves_to_itself() {
        let reg = registry(TokenTree::new().with_leaf("white", "#ffffff"));
        let resolver = Resolver::new(&reg);
        assert_eq!(resolver.resolve("white"), Some(TokenValue::from("#ffffff")));
    }

    #[test]
    fn follows_chains_of_any_length() {
        let mut tree = TokenTree::new().with_leaf("t0", "#123456");
        for i in 1..=12 {
            tree = tree.with_leaf(format!("t{i}"), format!("{{t{}}}", i - 1));
        }
        let reg = registry(tree);
        let resolver = Resolver::new(&reg);
        for i in 0..=12 {
            assert_eq!(
                resolver.resolve(&format!("t{i}")),
                Some(TokenValue::from("#123456")),
                "chain length {i}"
            );
        }
    }

    #[test]
    fn follows_references_across_sources() {
        let reg = SourceRegistry::new()
            .with_source(
                "alias",
                TokenTree::new().with_group("neutral", TokenTree::new().with_leaf("0", "{grey.0}")),
            )
            .unwrap()
            .with_source(
                "core",
                TokenTree::new().with_group("grey", TokenTree::new().with_leaf("0", "#ffffff")),
            )
            .unwrap();
        let resolver = Resolver::new(&reg);
        assert_eq!(resolver.resolve("neutral.0"), Some(TokenValue::from("#ffffff")));
    }

    #[test]
    fn self_reference_is_undefined() {
        let reg = registry(TokenTree::new().with_leaf("loop", "{loop}"));
        let resolver = Resolver::new(&reg);
        assert_eq!(resolver.resolve("loop"), None);
    }

    #[test]
    fn longer_cycles_are_undefined() {
        let reg = registry(
            TokenTree::new()
                .with_leaf("a", "{b}")
                .with_leaf("b", "{c}")
                .with_leaf("c", "{a}")
                .with_leaf("entry", "{a}")
                .with_leaf("ok", "#000000"),
        );
        let resolver = Resolver::new(&reg);
        for path in ["a", "b", "c", "entry"] {
            assert_eq!(resolver.resolve(path), None, "{path}");
        }
        // unrelated tokens are unaffected
        assert_eq!(resolver.resolve("ok"), Some(TokenValue::from("#000000")));
    }

    #[test]
    fn missing_paths_are_undefined() {
        let reg = registry(
            TokenTree::new()
                .with_leaf("dangling", "{nowhere.at.all}")
                .with_group("grey", TokenTree::new().with_leaf("0", "#fff")),
        );
        let resolver = Resolver::new(&reg);
        assert_eq!(resolver.resolve("nowhere"), None);
        assert_eq!(resolver.resolve("grey.1"), None);
        assert_eq!(resolver.resolve("grey.0.deeper"), None);
        assert_eq!(resolver.resolve("dangling"), None);
        assert_eq!(resolver.resolve(""), None);
    }

    #[test]
    fn null_is_distinct_from_absent() {
        let reg = registry(TokenTree::new().with_leaf("empty", TokenValue::Null));
        let resolver = Resolver::new(&reg);
        assert_eq!(resolver.resolve("empty"), Some(TokenValue::Null));
        assert_eq!(resolver.resolve("absent"), None);
    }

    #[test]
    fn group_targets_resolve_to_objects() {
        let reg = registry(
            TokenTree::new()
                .with_group("grey", TokenTree::new().with_leaf("0", "#fff").with_leaf("1", "#eee"))
                .with_leaf("palette", "{grey}"),
        );
        let resolver = Resolver::new(&reg);
        let value = resolver.resolve("palette").unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["1"], TokenValue::from("#eee"));
    }

    #[test]
    fn visited_set_records_the_chain() {
        let reg = registry(
            TokenTree::new()
                .with_leaf("a", "{b}")
                .with_leaf("b", "1px"),
        );
        let resolver = Resolver::new(&reg);
        let mut visited = Visited::default();
        assert_eq!(resolver.resolve_with("a", &mut visited), Some(TokenValue::from("1px")));
        assert!(visited.contains("a"));
        assert!(visited.contains("b"));
    }

    #[test]
    fn cached_results_match_fresh_results() {
        let reg = registry(TokenTree::new().with_leaf("a", "{b}").with_leaf("b", "2px"));
        let resolver = Resolver::new(&reg);
        let first = resolver.resolve("a");
        let second = resolver.resolve("a");
        resolver.clear_cache();
        let third = resolver.resolve("a");
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn cache_hits_still_see_the_callers_trail() {
        let reg = registry(TokenTree::new().with_leaf("a", "{b}").with_leaf("b", "3px"));
        let resolver = Resolver::new(&reg);
        assert_eq!(resolver.resolve("a"), Some(TokenValue::from("3px")));

        // `b` is already on the caller's trail, so `a` must cycle
        let mut visited: Visited = ["b".to_string()].into_iter().collect();
        assert_eq!(resolver.resolve_with("a", &mut visited), None);

        let mut fresh = Visited::default();
        assert_eq!(resolver.resolve_with("a", &mut fresh), Some(TokenValue::from("3px")));
        assert!(fresh.contains("a"));
        assert!(fresh.contains("b"));
    }

    #[test]
    fn resolver_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Resolver<'static>>();
    }
}
