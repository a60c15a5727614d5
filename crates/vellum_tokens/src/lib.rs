//! Vellum Design Tokens
//!
//! Resolves declarative design-token documents into renderer-ready values
//! for a light and a dark theme.
//!
//! # Overview
//!
//! - **Sources**: named token trees (`alias`, `core`, `light`, `dark`, `web`)
//!   searched in a fixed priority order
//! - **References**: `{dotted.path}` values are followed across sources, with
//!   cycle detection
//! - **Normalization**: nested objects are resolved leaf by leaf, and shadow
//!   layer arrays become CSS `box-shadow` strings
//! - **Theme maps**: a fixed manifest publishes one flat
//!   category → key → value map per theme
//!
//! # Quick Start
//!
//! ```rust
//! use vellum_tokens::{bg_token, spacing_token, ThemeTokens, ThemeVariant};
//!
//! // Resolve both themes once at startup
//! ThemeTokens::init_default().expect("built-in tokens load");
//!
//! let tokens = ThemeTokens::get();
//! let dark = tokens.for_variant(ThemeVariant::Dark);
//!
//! assert_eq!(dark.get_str("bg", "default"), Some("#101828"));
//! // unknown variants fall back to `bg.default`, unknown sizes to `spacing.s`
//! assert_eq!(bg_token(dark, "sparkly"), Some("#101828"));
//! assert_eq!(spacing_token(tokens.light(), "huge"), Some("12px"));
//! ```
//!
//! # Failure policy
//!
//! Resolution never fails. A path no source defines, or a reference cycle
//! (reported with `tracing::warn!`), leaves the token undefined; every other
//! token in the theme still resolves. Only loading documents and manifests
//! returns [`TokenError`].

pub mod aggregate;
pub mod error;
pub mod manifest;
pub mod map;
pub mod normalize;
pub mod registry;
pub mod resolver;
pub mod shadow;
pub mod state;
pub mod tree;
pub mod value;

// Re-export commonly used types
pub use aggregate::{build_theme_tokens, Aggregator};
pub use error::{Result, TokenError};
pub use manifest::{Manifest, ManifestEntry, Origin};
pub use map::{ResolvedTokenMap, TokenCategory};
pub use normalize::Normalizer;
pub use registry::{SourceRegistry, BUILTIN_PRIORITY};
pub use resolver::{Resolver, Visited};
pub use shadow::{format_shadows, Shadow, ShadowKind};
pub use state::{bg, bg_token, default_tokens, spacing, spacing_token, ThemeTokens, ThemeVariant};
pub use tree::{Token, TokenNode, TokenTree};
pub use value::{reference_path, TokenValue};
