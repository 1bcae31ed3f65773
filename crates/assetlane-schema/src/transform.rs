//! Transform classification
//!
//! Loader identifiers are strings owned by external tools. Classifying
//! them into a closed set (plus an escape hatch for unknown names) lets
//! strict validation fail fast on unsupported transforms instead of
//! silently mis-bundling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Loader name for the file-emission transform
pub const FILE_EMIT_LOADER: &str = "file-loader";

/// Loader name for the content-extraction transform
pub const EXTRACT_LOADER: &str = "extract-loader";

/// Loader name for the CSS-resolution transform
pub const CSS_LOADER: &str = "css-loader";

/// Loader name for the Sass compiler transform
pub const SASS_LOADER: &str = "sass-loader";

/// Loader name for the script-syntax transform
pub const SCRIPT_LOADER: &str = "babel-loader";

/// All loader names this crate recognizes
pub const KNOWN_LOADERS: &[&str] = &[
    FILE_EMIT_LOADER,
    EXTRACT_LOADER,
    CSS_LOADER,
    SASS_LOADER,
    SCRIPT_LOADER,
];

/// Classified transform identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// Copies/renames a matched asset to a target path, parameterized by
    /// an output name template
    FileEmit,

    /// Pulls compiled output out of an intermediate module wrapper into
    /// a flat file
    Extract,

    /// Resolves `@import`/`url()` references within CSS
    Css,

    /// Compiles Sass to CSS, parameterized by additional module-search
    /// paths
    Sass,

    /// Lowers modern script syntax via a named preset
    Script,

    /// Escape hatch for identifiers this crate does not recognize
    Other(String),
}

impl TransformKind {
    /// Classify a loader identifier
    pub fn from_loader(name: &str) -> Self {
        match name {
            FILE_EMIT_LOADER => Self::FileEmit,
            EXTRACT_LOADER => Self::Extract,
            CSS_LOADER => Self::Css,
            SASS_LOADER => Self::Sass,
            SCRIPT_LOADER => Self::Script,
            other => Self::Other(other.to_string()),
        }
    }

    /// The loader identifier the external bundler expects
    pub fn loader_name(&self) -> &str {
        match self {
            Self::FileEmit => FILE_EMIT_LOADER,
            Self::Extract => EXTRACT_LOADER,
            Self::Css => CSS_LOADER,
            Self::Sass => SASS_LOADER,
            Self::Script => SCRIPT_LOADER,
            Self::Other(name) => name,
        }
    }

    /// Whether this identifier belongs to the recognized set
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.loader_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_loaders_round_trip() {
        for name in KNOWN_LOADERS {
            let kind = TransformKind::from_loader(name);
            assert!(kind.is_known(), "{} should be known", name);
            assert_eq!(kind.loader_name(), *name);
        }
    }

    #[test]
    fn test_unknown_loader_escape_hatch() {
        let kind = TransformKind::from_loader("coffee-loader");
        assert!(!kind.is_known());
        assert_eq!(kind, TransformKind::Other("coffee-loader".to_string()));
        assert_eq!(kind.loader_name(), "coffee-loader");
    }

    #[test]
    fn test_display_matches_loader_name() {
        assert_eq!(TransformKind::Sass.to_string(), "sass-loader");
        assert_eq!(
            TransformKind::Other("x-loader".to_string()).to_string(),
            "x-loader"
        );
    }
}
