//! Token loading errors
//!
//! Resolution itself never fails: a missing or circular reference degrades to
//! an undefined slot. These errors only cover reading token documents and
//! manifests.

use thiserror::Error;

/// Errors raised while loading token sources or manifests
#[derive(Error, Debug)]
pub enum TokenError {
    /// A token document is not valid JSON
    #[error("failed to parse token document `{source_name}`: {error}")]
    Json {
        source_name: String,
        #[source]
        error: serde_json::Error,
    },

    /// A token document's root is not an object
    #[error("token document `{0}` must have an object at its root")]
    InvalidRoot(String),

    /// Two sources were registered under the same name
    #[error("duplicate token source `{0}`")]
    DuplicateSource(String),

    /// A manifest entry names a source that is not registered
    #[error("manifest entry `{category}.{key}` refers to unknown source `{origin}`")]
    UnknownOrigin {
        category: String,
        key: String,
        origin: String,
    },

    /// The registry has no source for a theme variant
    #[error("no token source for theme `{0}`")]
    MissingTheme(String),

    /// A manifest file could not be parsed
    #[error("failed to parse manifest: {0}")]
    Manifest(#[from] toml::de::Error),

    /// Reading a token file from disk failed
    #[error("failed to read `{path}`: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
}

/// Result type for token loading operations
pub type Result<T> = std::result::Result<T, TokenError>;
