//! Value normalization
//!
//! Turns a raw token value into its renderer-ready form:
//! - references are resolved (and their targets normalized in turn)
//! - arrays and objects are normalized element by element
//! - arrays of shadow descriptors collapse into one CSS shadow string
//! - scalars pass through unchanged

use crate::resolver::{Resolver, Visited};
use crate::shadow::{format_shadows, Shadow};
use crate::tree::TokenNode;
use crate::value::TokenValue;

/// Normalizes token values against a [`Resolver`]
pub struct Normalizer<'r, 'a> {
    resolver: &'r Resolver<'a>,
}

impl<'r, 'a> Normalizer<'r, 'a> {
    pub fn new(resolver: &'r Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Normalize a tree node (absent nodes stay undefined)
    pub fn normalize_node(&self, node: Option<&TokenNode>) -> Option<TokenValue> {
        let value = node?.to_value();
        self.normalize(&value)
    }

    /// Normalize a value with a fresh reference trail.
    ///
    /// Object members that normalize to undefined are left out of the
    /// resulting object; undefined array elements become `null`.
    pub fn normalize(&self, value: &TokenValue) -> Option<TokenValue> {
        self.normalize_in(value, &Visited::default())
    }

    /// `trail` holds the references being expanded above this value, so a
    /// cycle through an object or array still terminates.
    ///
    /// Objects keep only the members that are defined, so the result may have
    /// fewer keys than the input. Array positions are kept, with `null` for
    /// undefined elements.
    fn normalize_in(&self, value: &TokenValue, trail: &Visited) -> Option<TokenValue> {
        match value {
            TokenValue::String(s) => match crate::value::reference_path(s) {
                Some(path) => {
                    let mut visited = trail.clone();
                    let resolved = self.resolver.resolve_with(path, &mut visited)?;
                    self.normalize_in(&resolved, &visited)
                }
                None => Some(value.clone()),
            },
            TokenValue::Array(items) => Some(self.normalize_array(items, trail)),
            TokenValue::Object(map) => Some(TokenValue::Object(
                map.iter()
                    .filter_map(|(key, v)| Some((key.clone(), self.normalize_in(v, trail)?)))
                    .collect(),
            )),
            TokenValue::Null | TokenValue::Bool(_) | TokenValue::Number(_) => Some(value.clone()),
        }
    }

    fn normalize_array(&self, items: &[TokenValue], trail: &Visited) -> TokenValue {
        let resolved: Vec<TokenValue> = items
            .iter()
            .map(|item| self.normalize_in(item, trail).unwrap_or(TokenValue::Null))
            .collect();

        if !resolved.first().is_some_and(Shadow::is_descriptor) {
            return TokenValue::Array(resolved);
        }

        match resolved.iter().map(Shadow::from_value).collect::<Option<Vec<_>>>() {
            Some(layers) => TokenValue::String(format_shadows(&layers)),
            None => {
                tracing::debug!("malformed shadow descriptor, keeping raw array");
                TokenValue::Array(resolved)
            }
        }
    }
}
