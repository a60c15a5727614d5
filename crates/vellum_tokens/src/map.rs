//! Resolved token maps
//!
//! A [`ResolvedTokenMap`] is the published output for one theme: a flat
//! category → key → value mapping. Undefined tokens keep their slot with a
//! `None` value so consumers can tell "not defined" from "not published".

use crate::value::TokenValue;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// Tokens of one category, keyed by token key
pub type TokenCategory = IndexMap<String, Option<TokenValue>>;

/// Fully resolved tokens for one theme
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedTokenMap {
    categories: IndexMap<String, TokenCategory>,
}

impl ResolvedTokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a slot, creating its category on first use
    pub fn insert(&mut self, category: &str, key: &str, value: Option<TokenValue>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// A resolved value; `None` for unknown slots and undefined tokens alike
    pub fn get(&self, category: &str, key: &str) -> Option<&TokenValue> {
        self.slot(category, key)?.as_ref()
    }

    /// A slot: `None` if not published, `Some(None)` if published but undefined
    pub fn slot(&self, category: &str, key: &str) -> Option<&Option<TokenValue>> {
        self.categories.get(category)?.get(key)
    }

    /// A resolved value by dotted name (`"borders.input.error"`)
    pub fn lookup(&self, name: &str) -> Option<&TokenValue> {
        let (category, key) = name.split_once('.')?;
        self.get(category, key)
    }

    /// A resolved string value
    pub fn get_str(&self, category: &str, key: &str) -> Option<&str> {
        self.get(category, key)?.as_str()
    }

    pub fn category(&self, category: &str) -> Option<&TokenCategory> {
        self.categories.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &TokenCategory)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Slots whose token did not resolve, as `category.key`
    pub fn undefined(&self) -> Vec<String> {
        self.categories()
            .flat_map(|(category, tokens)| {
                tokens
                    .iter()
                    .filter(|(_, v)| v.is_none())
                    .map(move |(key, _)| format!("{category}.{key}"))
            })
            .collect()
    }

    /// Total number of slots
    pub fn len(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generate a CSS variable map from every scalar token.
    ///
    /// Keys are variable names without the `--` prefix, built as
    /// `{category}-{key}` with dots in keys replaced by `-`. Object-valued
    /// tokens contribute one variable per member (`borders-input-error-color`).
    /// Undefined tokens are skipped.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let vars = ThemeTokens::get().light().to_css_variable_map();
    /// // vars["bg-default"] == "#ffffff"
    /// // vars["spacing-s"] == "12px"
    /// ```
    pub fn to_css_variable_map(&self) -> HashMap<String, String> {
        fn push(vars: &mut HashMap<String, String>, name: String, value: &TokenValue) {
            match value {
                TokenValue::Object(members) => {
                    for (member, v) in members {
                        push(vars, format!("{name}-{member}"), v);
                    }
                }
                TokenValue::Null | TokenValue::Array(_) => {}
                scalar => {
                    vars.insert(name, scalar.to_string());
                }
            }
        }

        let mut vars = HashMap::with_capacity(self.len());
        for (category, tokens) in self.categories() {
            for (key, value) in tokens {
                if let Some(value) = value {
                    let name = format!("{category}-{}", key.replace('.', "-"));
                    push(&mut vars, name, value);
                }
            }
        }
        vars
    }

    /// Render as a `:root { ... }` CSS block, sorted by variable name
    pub fn to_css(&self, selector: &str) -> String {
        let mut vars: Vec<(String, String)> = self.to_css_variable_map().into_iter().collect();
        vars.sort();
        let mut out = format!("{selector} {{\n");
        for (name, value) in vars {
            out.push_str(&format!("  --{name}: {value};\n"));
        }
        out.push_str("}\n");
        out
    }
}
