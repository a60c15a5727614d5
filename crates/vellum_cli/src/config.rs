//! Vellum configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vellum_tokens::{Manifest, SourceRegistry, ThemeTokens};

/// Top-level Vellum configuration (vellum.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VellumConfig {
    /// Manifest file (TOML); the built-in manifest when absent
    #[serde(default)]
    pub manifest: Option<String>,
    /// Token sources, highest priority first
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub themes: ThemesConfig,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    root: PathBuf,
}

/// One token document
#[derive(Debug, Deserialize, Serialize)]
pub struct SourceConfig {
    pub name: String,
    pub path: String,
}

/// Which sources hold the two theme trees
#[derive(Debug, Deserialize, Serialize)]
pub struct ThemesConfig {
    #[serde(default = "default_light")]
    pub light: String,
    #[serde(default = "default_dark")]
    pub dark: String,
}

fn default_light() -> String {
    "light".to_string()
}

fn default_dark() -> String {
    "dark".to_string()
}

impl Default for ThemesConfig {
    fn default() -> Self {
        Self {
            light: default_light(),
            dark: default_dark(),
        }
    }
}

impl VellumConfig {
    /// Load configuration from a file, or from `vellum.toml` in a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("vellum.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No config found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: VellumConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!(
            "loaded {} with {} sources",
            config_path.display(),
            config.sources.len()
        );
        Ok(config)
    }

    fn resolve_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Token sources in priority order; the built-in set when none are listed
    pub fn registry(&self) -> Result<SourceRegistry> {
        if self.sources.is_empty() {
            return SourceRegistry::builtin().context("Failed to load built-in tokens");
        }

        let mut registry = SourceRegistry::new();
        for source in &self.sources {
            let path = self.resolve_path(&source.path);
            registry
                .push_file(&source.name, &path)
                .with_context(|| format!("Failed to load token source `{}`", source.name))?;
        }
        Ok(registry)
    }

    /// The configured manifest, or the built-in one
    pub fn manifest(&self) -> Result<Manifest> {
        let Some(relative) = &self.manifest else {
            return Ok(Manifest::builtin());
        };
        let path = self.resolve_path(relative);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Manifest::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Resolve both themes
    pub fn theme_tokens(&self, registry: &SourceRegistry) -> Result<ThemeTokens> {
        let manifest = self.manifest()?;
        let tree = |name: &str| {
            registry
                .get(name)
                .with_context(|| format!("Theme source `{name}` is not configured"))
        };
        let tokens = ThemeTokens::build(
            registry,
            &manifest,
            tree(&self.themes.light)?,
            tree(&self.themes.dark)?,
        )?;
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_uses_builtin_tokens() {
        let config = VellumConfig::default();
        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 5);
        let tokens = config.theme_tokens(&registry).unwrap();
        assert_eq!(tokens.light().get_str("bg", "default"), Some("#ffffff"));
    }

    #[test]
    fn loads_sources_relative_to_the_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("vellum.toml"),
            r#"
manifest = "manifest.toml"

[[source]]
name = "base"
path = "tokens/base.json"

[[source]]
name = "day"
path = "tokens/day.json"

[[source]]
name = "night"
path = "tokens/night.json"

[themes]
light = "day"
dark = "night"
"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("tokens")).unwrap();
        fs::write(
            dir.path().join("tokens/base.json"),
            r##"{ "white": "#fff", "black": "#000", "gap": { "$value": "4px" } }"##,
        )
        .unwrap();
        fs::write(dir.path().join("tokens/day.json"), r#"{ "bg": { "default": "{white}" } }"#).unwrap();
        fs::write(dir.path().join("tokens/night.json"), r#"{ "bg": { "default": "{black}" } }"#).unwrap();
        fs::write(
            dir.path().join("manifest.toml"),
            r#"
[[entry]]
category = "bg"
key = "default"

[[entry]]
category = "spacing"
key = "s"
origin = "base"
path = "gap"
"#,
        )
        .unwrap();

        let config = VellumConfig::load(dir.path()).unwrap();
        let registry = config.registry().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["base", "day", "night"]);

        let tokens = config.theme_tokens(&registry).unwrap();
        assert_eq!(tokens.light().get_str("bg", "default"), Some("#fff"));
        assert_eq!(tokens.dark().get_str("bg", "default"), Some("#000"));
        assert_eq!(tokens.dark().get_str("spacing", "s"), Some("4px"));
    }

    #[test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = VellumConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("No config found"));
    }

    #[test]
    fn unknown_theme_source_is_an_error() {
        let config: VellumConfig = toml::from_str("[themes]\nlight = \"sunrise\"").unwrap();
        let registry = config.registry().unwrap();
        let err = config.theme_tokens(&registry).unwrap_err();
        assert_eq!(err.to_string(), "Theme source `sunrise` is not configured");
    }
}
