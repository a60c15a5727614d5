//! Global theme tokens
//!
//! Both theme maps are resolved once, eagerly, by an explicit init call at
//! startup and are read-only afterwards. Rendering code reads them directly
//! without locking.

use crate::aggregate::Aggregator;
use crate::error::{Result, TokenError};
use crate::manifest::Manifest;
use crate::map::ResolvedTokenMap;
use crate::registry::{SourceRegistry, DARK, LIGHT};
use crate::resolver::Resolver;
use crate::tree::TokenTree;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

/// Global theme tokens instance
static THEME_TOKENS: OnceLock<ThemeTokens> = OnceLock::new();

/// Theme variant
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum ThemeVariant {
    #[default]
    Light,
    Dark,
}

impl ThemeVariant {
    /// Stable id, matching the built-in source names
    pub fn id(self) -> &'static str {
        match self {
            Self::Light => LIGHT,
            Self::Dark => DARK,
        }
    }

    /// The other variant
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn all() -> &'static [ThemeVariant] {
        const VARIANTS: [ThemeVariant; 2] = [ThemeVariant::Light, ThemeVariant::Dark];
        &VARIANTS
    }
}

impl Display for ThemeVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ThemeVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme variant `{other}` (expected light or dark)")),
        }
    }
}

/// Resolved token maps for both theme variants
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeTokens {
    light: ResolvedTokenMap,
    dark: ResolvedTokenMap,
}

impl ThemeTokens {
    /// Resolve both themes.
    ///
    /// `light_tree` / `dark_tree` are the theme sources; shared origins in the
    /// manifest are looked up in `registry`.
    pub fn build(
        registry: &SourceRegistry,
        manifest: &Manifest,
        light_tree: &TokenTree,
        dark_tree: &TokenTree,
    ) -> Result<Self> {
        manifest.validate(registry)?;
        // Each theme gets its own resolver; the builds share no state
        let build = |tree: &TokenTree| {
            let resolver = Resolver::new(registry);
            Aggregator::new(&resolver, manifest).build_theme_tokens(tree)
        };

        Ok(Self {
            light: build(light_tree),
            dark: build(dark_tree),
        })
    }

    /// Resolve both themes from the registry's `light` and `dark` sources
    pub fn from_registry(registry: &SourceRegistry, manifest: &Manifest) -> Result<Self> {
        let light = registry
            .get(LIGHT)
            .ok_or_else(|| missing_theme(LIGHT))?;
        let dark = registry.get(DARK).ok_or_else(|| missing_theme(DARK))?;
        Self::build(registry, manifest, light, dark)
    }

    /// Resolve the built-in token set with the built-in manifest
    pub fn builtin() -> Result<Self> {
        let registry = SourceRegistry::builtin()?;
        Self::from_registry(&registry, &Manifest::builtin())
    }

    /// Initialize the global theme tokens (call once at app startup).
    ///
    /// Safe to call multiple times; the first call wins.
    pub fn init(tokens: ThemeTokens) {
        if THEME_TOKENS.set(tokens).is_err() {
            tracing::debug!("ThemeTokens already initialized, keeping the first instance");
        }
    }

    /// Initialize with the built-in token set
    pub fn init_default() -> Result<()> {
        if THEME_TOKENS.get().is_none() {
            Self::init(Self::builtin()?);
        }
        Ok(())
    }

    /// Get the global theme tokens instance
    pub fn get() -> &'static ThemeTokens {
        THEME_TOKENS
            .get()
            .expect("ThemeTokens not initialized. Call ThemeTokens::init() at app startup.")
    }

    /// Try to get the global theme tokens (returns None if not initialized)
    pub fn try_get() -> Option<&'static ThemeTokens> {
        THEME_TOKENS.get()
    }

    pub fn light(&self) -> &ResolvedTokenMap {
        &self.light
    }

    pub fn dark(&self) -> &ResolvedTokenMap {
        &self.dark
    }

    pub fn for_variant(&self, variant: ThemeVariant) -> &ResolvedTokenMap {
        match variant {
            ThemeVariant::Light => &self.light,
            ThemeVariant::Dark => &self.dark,
        }
    }
}

fn missing_theme(name: &str) -> TokenError {
    TokenError::MissingTheme(name.to_string())
}

// ========== Accessors ==========

/// Background color for `variant`, falling back to `bg.default`
pub fn bg_token<'m>(map: &'m ResolvedTokenMap, variant: &str) -> Option<&'m str> {
    map.get_str("bg", variant)
        .or_else(|| map.get_str("bg", "default"))
}

/// Spacing value for `size`, falling back to `spacing.s`
pub fn spacing_token<'m>(map: &'m ResolvedTokenMap, size: &str) -> Option<&'m str> {
    map.get_str("spacing", size)
        .or_else(|| map.get_str("spacing", "s"))
}

/// Default theme map (light) from the global instance, if initialized
pub fn default_tokens() -> Option<&'static ResolvedTokenMap> {
    ThemeTokens::try_get().map(ThemeTokens::light)
}

/// [`bg_token`] against the global light theme
pub fn bg(variant: &str) -> Option<&'static str> {
    bg_token(default_tokens()?, variant)
}

/// [`spacing_token`] against the global light theme
pub fn spacing(size: &str) -> Option<&'static str> {
    spacing_token(default_tokens()?, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn variant_parsing_and_toggle() {
        assert_eq!("light".parse::<ThemeVariant>(), Ok(ThemeVariant::Light));
        assert_eq!(" Dark ".parse::<ThemeVariant>(), Ok(ThemeVariant::Dark));
        assert!("sepia".parse::<ThemeVariant>().is_err());
        assert_eq!(ThemeVariant::default(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.toggle(), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::Dark.toggle().toggle(), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::Dark.to_string(), "dark");
    }

    #[test]
    fn accessors_fall_back() {
        let mut map = ResolvedTokenMap::new();
        map.insert("bg", "default", Some("#ffffff".into()));
        map.insert("bg", "disabled", None);
        map.insert("spacing", "s", Some("12px".into()));
        map.insert("spacing", "l", Some("24px".into()));

        assert_eq!(bg_token(&map, "default"), Some("#ffffff"));
        assert_eq!(bg_token(&map, "unknown"), Some("#ffffff"));
        // an undefined slot also falls back
        assert_eq!(bg_token(&map, "disabled"), Some("#ffffff"));
        assert_eq!(spacing_token(&map, "l"), Some("24px"));
        assert_eq!(spacing_token(&map, "huge"), Some("12px"));
        assert_eq!(spacing_token(&ResolvedTokenMap::new(), "s"), None);
    }

    #[test]
    fn global_init_first_call_wins() {
        ThemeTokens::init_default().unwrap();
        let first = ThemeTokens::get() as *const ThemeTokens;
        ThemeTokens::init(ThemeTokens {
            light: ResolvedTokenMap::new(),
            dark: ResolvedTokenMap::new(),
        });
        assert_eq!(first, ThemeTokens::get() as *const ThemeTokens);
        assert_eq!(bg("default"), Some("#ffffff"));
        assert_eq!(spacing("nope"), Some("12px"));
    }
}
