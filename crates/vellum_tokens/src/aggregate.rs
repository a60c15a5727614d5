//! Theme aggregation
//!
//! Builds one [`ResolvedTokenMap`] per theme by normalizing every manifest
//! entry. A token that fails to resolve leaves an undefined slot; it never
//! aborts the build.

use crate::manifest::{Manifest, Origin};
use crate::map::ResolvedTokenMap;
use crate::normalize::Normalizer;
use crate::registry::SourceRegistry;
use crate::resolver::Resolver;
use crate::tree::TokenTree;

/// Builds resolved theme maps from a manifest
pub struct Aggregator<'r, 'a> {
    resolver: &'r Resolver<'a>,
    manifest: &'r Manifest,
}

impl<'r, 'a> Aggregator<'r, 'a> {
    pub fn new(resolver: &'r Resolver<'a>, manifest: &'r Manifest) -> Self {
        Self { resolver, manifest }
    }

    /// Resolve every manifest entry for one theme tree
    pub fn build_theme_tokens(&self, theme: &TokenTree) -> ResolvedTokenMap {
        let normalizer = Normalizer::new(self.resolver);
        let registry = self.resolver.registry();
        let mut map = ResolvedTokenMap::new();

        for entry in self.manifest.entries() {
            let tree = match &entry.origin {
                Origin::Theme => Some(theme),
                Origin::Source(name) => registry.get(name),
            };
            let node = tree.and_then(|tree| tree.lookup(&entry.path));
            let value = normalizer.normalize_node(node);
            if value.is_none() {
                tracing::debug!(
                    "token {}.{} ({}:{}) is undefined",
                    entry.category,
                    entry.key,
                    entry.origin.name(),
                    entry.path
                );
            }
            map.insert(&entry.category, &entry.key, value);
        }

        tracing::debug!(
            "built theme map: {} tokens, {} undefined",
            map.len(),
            map.undefined().len()
        );
        map
    }
}

/// Build one theme map with a fresh resolver
pub fn build_theme_tokens(
    registry: &SourceRegistry,
    manifest: &Manifest,
    theme: &TokenTree,
) -> ResolvedTokenMap {
    let resolver = Resolver::new(registry);
    Aggregator::new(&resolver, manifest).build_theme_tokens(theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestEntry;
    use crate::value::TokenValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixture() -> (SourceRegistry, Manifest, TokenTree, TokenTree) {
        let core = TokenTree::from_json(
            "core",
            json!({
                "grey": { "0": "#ffffff", "900": "#101828" },
                "spacing": { "s": "12px" },
                "loop": "{loop}"
            }),
        )
        .unwrap();
        let light = TokenTree::from_json(
            "light",
            json!({ "bg": { "default": { "$value": "{grey.0}" }, "broken": "{loop}" } }),
        )
        .unwrap();
        let dark = TokenTree::from_json(
            "dark",
            json!({ "bg": { "default": { "$value": "{grey.900}" }, "broken": "{nowhere}" } }),
        )
        .unwrap();
        let registry = SourceRegistry::new()
            .with_source("core", core)
            .unwrap()
            .with_source("light", light.clone())
            .unwrap()
            .with_source("dark", dark.clone())
            .unwrap();
        let manifest = Manifest::new(vec![
            ManifestEntry::new("bg", "default", Origin::Theme, "bg.default"),
            ManifestEntry::new("bg", "broken", Origin::Theme, "bg.broken"),
            ManifestEntry::new("bg", "missing", Origin::Theme, "bg.missing"),
            ManifestEntry::new("spacing", "s", Origin::Source("core".into()), "spacing.s"),
            ManifestEntry::new("spacing", "m", Origin::Source("gone".into()), "spacing.m"),
        ]);
        (registry, manifest, light, dark)
    }

    #[test]
    fn builds_each_theme_from_its_own_tree() {
        let (registry, manifest, light, dark) = fixture();
        let light_map = build_theme_tokens(&registry, &manifest, &light);
        let dark_map = build_theme_tokens(&registry, &manifest, &dark);
        assert_eq!(light_map.get_str("bg", "default"), Some("#ffffff"));
        assert_eq!(dark_map.get_str("bg", "default"), Some("#101828"));
        assert_eq!(light_map.get("spacing", "s"), dark_map.get("spacing", "s"));
    }

    #[test]
    fn broken_tokens_leave_undefined_slots() {
        let (registry, manifest, light, _) = fixture();
        let map = build_theme_tokens(&registry, &manifest, &light);
        assert_eq!(
            map.undefined(),
            vec!["bg.broken", "bg.missing", "spacing.m"]
        );
        assert_eq!(map.get("spacing", "s"), Some(&TokenValue::from("12px")));
    }

    #[test]
    fn building_twice_is_idempotent() {
        let (registry, manifest, light, _) = fixture();
        let resolver = Resolver::new(&registry);
        let aggregator = Aggregator::new(&resolver, &manifest);
        let first = aggregator.build_theme_tokens(&light);
        let second = aggregator.build_theme_tokens(&light);
        assert_eq!(first, second);
        assert_eq!(first, build_theme_tokens(&registry, &manifest, &light));
    }
}
