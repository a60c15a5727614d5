//! Rendering resolved tokens for the terminal

use anyhow::{Context, Result};
use clap::ValueEnum;
use vellum_tokens::{ResolvedTokenMap, ThemeVariant, TokenValue};

/// Output format for `vellum build`
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Toml,
    Css,
}

/// CSS selector a theme's variables are scoped to
pub fn css_selector(variant: ThemeVariant) -> String {
    match variant {
        ThemeVariant::Light => ":root".to_string(),
        variant => format!("[data-theme=\"{variant}\"]"),
    }
}

/// Render one or more theme maps
pub fn render(themes: &[(ThemeVariant, &ResolvedTokenMap)], format: Format) -> Result<String> {
    match format {
        Format::Json => {
            let value = if let [(_, map)] = themes {
                serde_json::to_value(map)?
            } else {
                let mut out = serde_json::Map::new();
                for (variant, map) in themes {
                    out.insert(variant.id().to_string(), serde_json::to_value(map)?);
                }
                serde_json::Value::Object(out)
            };
            Ok(serde_json::to_string_pretty(&value)?)
        }
        Format::Toml => {
            let table = if let [(_, map)] = themes {
                map_to_toml(map)
            } else {
                themes
                    .iter()
                    .map(|(variant, map)| (variant.id().to_string(), toml::Value::Table(map_to_toml(map))))
                    .collect()
            };
            toml::to_string_pretty(&table).context("Failed to serialize tokens as TOML")
        }
        Format::Css => Ok(themes
            .iter()
            .map(|(variant, map)| map.to_css(&css_selector(*variant)))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render a single value: strings bare, everything else as JSON
pub fn render_value(value: &TokenValue) -> Result<String> {
    Ok(match value {
        TokenValue::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other)?,
    })
}

/// TOML has no null, so undefined tokens and null values are left out
fn map_to_toml(map: &ResolvedTokenMap) -> toml::Table {
    map.categories()
        .map(|(category, tokens)| {
            let table: toml::Table = tokens
                .iter()
                .filter_map(|(key, value)| Some((key.clone(), to_toml(value.as_ref()?)?)))
                .collect();
            (category.to_string(), toml::Value::Table(table))
        })
        .collect()
}

fn to_toml(value: &TokenValue) -> Option<toml::Value> {
    Some(match value {
        TokenValue::Null => return None,
        TokenValue::Bool(b) => toml::Value::Boolean(*b),
        TokenValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
            toml::Value::Integer(*n as i64)
        }
        TokenValue::Number(n) => toml::Value::Float(*n),
        TokenValue::String(s) => toml::Value::String(s.clone()),
        TokenValue::Array(items) => toml::Value::Array(items.iter().filter_map(to_toml).collect()),
        TokenValue::Object(members) => toml::Value::Table(
            members
                .iter()
                .filter_map(|(k, v)| Some((k.clone(), to_toml(v)?)))
                .collect(),
        ),
    })
}
