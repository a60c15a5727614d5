//! Shadow descriptors
//!
//! Box shadow tokens are arrays of layer descriptors
//! (`{x, y, blur, spread, color, type}`). Once resolved they are published as
//! a single CSS `box-shadow` string.

use crate::value::TokenValue;
use std::fmt;

/// Fields a value must carry to be treated as a shadow layer
pub const SHADOW_FIELDS: [&str; 5] = ["x", "y", "blur", "spread", "color"];

/// Kind of shadow layer
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum ShadowKind {
    #[default]
    DropShadow,
    InnerShadow,
}

impl ShadowKind {
    /// Parse a descriptor `type`. Anything other than `innerShadow` renders
    /// as a drop shadow.
    pub fn from_type(ty: &str) -> Self {
        match ty {
            "innerShadow" => Self::InnerShadow,
            _ => Self::DropShadow,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::DropShadow => "dropShadow",
            Self::InnerShadow => "innerShadow",
        }
    }
}

/// One layer of a composite shadow
#[derive(Clone, Debug, PartialEq)]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub spread: f64,
    pub color: String,
    pub kind: ShadowKind,
}

impl Shadow {
    pub fn new(offset_x: f64, offset_y: f64, blur: f64, spread: f64, color: impl Into<String>) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread,
            color: color.into(),
            kind: ShadowKind::DropShadow,
        }
    }

    pub fn inner(mut self) -> Self {
        self.kind = ShadowKind::InnerShadow;
        self
    }

    /// Does `value` have the shape of a shadow layer?
    pub fn is_descriptor(value: &TokenValue) -> bool {
        value
            .as_object()
            .is_some_and(|map| SHADOW_FIELDS.iter().all(|field| map.contains_key(*field)))
    }

    /// Parse a resolved descriptor object.
    ///
    /// Lengths may be numbers or numeric strings. Returns `None` if a field
    /// is missing or has the wrong type.
    pub fn from_value(value: &TokenValue) -> Option<Self> {
        let map = value.as_object()?;
        let length = |field: &str| match map.get(field)? {
            TokenValue::Number(n) => Some(*n),
            TokenValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Some(Self {
            offset_x: length("x")?,
            offset_y: length("y")?,
            blur: length("blur")?,
            spread: length("spread")?,
            color: map.get("color")?.as_str()?.to_string(),
            kind: map
                .get("type")
                .and_then(TokenValue::as_str)
                .map(ShadowKind::from_type)
                .unwrap_or_default(),
        })
    }
}

impl fmt::Display for Shadow {
    /// CSS form: `[inset ]{x}px {y}px {blur}px {spread}px {color}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == ShadowKind::InnerShadow {
            f.write_str("inset ")?;
        }
        write!(
            f,
            "{}px {}px {}px {}px {}",
            TokenValue::Number(self.offset_x),
            TokenValue::Number(self.offset_y),
            TokenValue::Number(self.blur),
            TokenValue::Number(self.spread),
            self.color
        )
    }
}

/// Format shadow layers as one CSS `box-shadow` value, in order
pub fn format_shadows(layers: &[Shadow]) -> String {
    layers
        .iter()
        .map(Shadow::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
