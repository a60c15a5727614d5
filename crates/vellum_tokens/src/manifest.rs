//! Theme manifest
//!
//! The manifest lists every published token: its category, its key within
//! the category, and where its definition lives (the theme tree being built,
//! or a named shared source).

use crate::error::{Result, TokenError};
use crate::registry::{SourceRegistry, ALIAS, CORE, WEB};
use serde::{Deserialize, Serialize};

/// Origin name that selects the theme tree being built
pub const THEME_ORIGIN: &str = "theme";

/// Where a manifest entry's definition lives
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum Origin {
    /// The theme tree passed to the aggregator
    Theme,
    /// A named source in the registry
    Source(String),
}

impl Origin {
    pub fn parse(name: &str) -> Self {
        if name == THEME_ORIGIN {
            Self::Theme
        } else {
            Self::Source(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Theme => THEME_ORIGIN,
            Self::Source(name) => name,
        }
    }
}

/// One published token
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManifestEntry {
    pub category: String,
    /// Key within the category; nested component tokens use dotted keys
    pub key: String,
    pub origin: Origin,
    /// Dotted path within the origin tree
    pub path: String,
}

impl ManifestEntry {
    pub fn new(category: &str, key: &str, origin: Origin, path: &str) -> Self {
        Self {
            category: category.to_string(),
            key: key.to_string(),
            origin,
            path: path.to_string(),
        }
    }
}

/// On-disk form of a manifest entry
#[derive(Debug, Deserialize, Serialize)]
struct EntryConfig {
    category: String,
    key: String,
    #[serde(default = "default_origin")]
    origin: String,
    /// Defaults to `{category}.{key}`
    #[serde(default)]
    path: Option<String>,
}

fn default_origin() -> String {
    THEME_ORIGIN.to_string()
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ManifestConfig {
    #[serde(default)]
    entry: Vec<EntryConfig>,
}

/// Ordered list of published tokens
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// The built-in manifest for the input component design system
    pub fn builtin() -> Self {
        let mut m = Vec::new();
        let theme = |m: &mut Vec<ManifestEntry>, category: &str, keys: &[&str]| {
            for key in keys {
                m.push(ManifestEntry::new(
                    category,
                    key,
                    Origin::Theme,
                    &format!("{category}.{key}"),
                ));
            }
        };
        // (category, source, source group, [(key, path segment)])
        let shared = |m: &mut Vec<ManifestEntry>,
                      category: &str,
                      source: &str,
                      group: &str,
                      keys: &[(&str, &str)]| {
            for (key, segment) in keys {
                m.push(ManifestEntry::new(
                    category,
                    key,
                    Origin::Source(source.to_string()),
                    &format!("{group}.{segment}"),
                ));
            }
        };
        let same = |keys: &[&'static str]| -> Vec<(&'static str, &'static str)> {
            keys.iter().map(|k| (*k, *k)).collect()
        };

        // Colors
        theme(&mut m, "bg", &["default", "default-strong", "default-stronger", "disabled"]);
        theme(&mut m, "content", &["primary", "secondary", "disabled"]);
        shared(&mut m, "fontWeight", CORE, "fontWeights", &same(&["400", "500", "600", "700"]));
        theme(&mut m, "border", &["input", "input-strong", "active", "negative"]);

        // Border width
        shared(&mut m, "borderWidth", CORE, "borderWidth", &same(&["s", "m", "l", "xl"]));
        shared(&mut m, "boxShadow", WEB, "boxShadow", &same(&["l", "m", "s"]));

        // Spacing
        shared(
            &mut m,
            "spacing",
            CORE,
            "spacing",
            &[
                ("xs", "xs"),
                ("s", "s"),
                ("m", "m"),
                ("l", "l"),
                ("xl", "xl"),
                ("xxl", "2xl"),
                ("3xs", "3xs"),
                ("2xs", "2xs"),
            ],
        );

        // Typography
        shared(&mut m, "fontSizes", CORE, "fontSize", &same(&["m", "l", "xl", "s", "xs"]));
        shared(&mut m, "lineHeights", CORE, "lineHeights", &same(&["m", "s", "xs"]));
        shared(&mut m, "fontFamilies", CORE, "fontFamilies", &same(&["body", "title"]));

        shared(&mut m, "borderRadius", ALIAS, "borderRadius", &same(&["input"]));
        shared(&mut m, "sizing", CORE, "sizing", &same(&["s", "m", "l", "xl", "4xl"]));

        // Component tokens
        shared(
            &mut m,
            "borders",
            WEB,
            "borders",
            &same(&["input.primary", "input.hover", "input.active", "input.error"]),
        );

        Self::new(m)
    }

    /// Parse a manifest from TOML (`[[entry]]` tables)
    ///
    /// ```toml
    /// [[entry]]
    /// category = "bg"
    /// key = "default"
    /// origin = "theme"        # or a source name; defaults to "theme"
    /// path = "bg.default"     # defaults to "{category}.{key}"
    /// ```
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: ManifestConfig = toml::from_str(src)?;
        let entries = config
            .entry
            .into_iter()
            .map(|e| {
                let path = e.path.unwrap_or_else(|| format!("{}.{}", e.category, e.key));
                ManifestEntry::new(&e.category, &e.key, Origin::parse(&e.origin), &path)
            })
            .collect();
        Ok(Self::new(entries))
    }

    /// Check that every shared origin names a registered source
    pub fn validate(&self, registry: &SourceRegistry) -> Result<()> {
        for entry in &self.entries {
            if let Origin::Source(name) = &entry.origin {
                if registry.get(name).is_none() {
                    return Err(TokenError::UnknownOrigin {
                        category: entry.category.clone(),
                        key: entry.key.clone(),
                        origin: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Category names in first-appearance order
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !out.contains(&entry.category.as_str()) {
                out.push(&entry.category);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
