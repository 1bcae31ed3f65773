//! Descriptor file loading with provenance
//!
//! The external bundler reads the descriptor from a well-known file name
//! at build invocation time. This module does the same read, but keeps a
//! record of where the value came from: source path, SHA-256 digest of
//! the raw bytes, detected format, and load timestamp.
//!
//! JSON files may hold a single configuration object or an array of
//! them. TOML files hold a single configuration table (TOML has no
//! top-level array); the one-or-many normalization still applies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use assetlane_schema::{validate_set, DescriptorSet, SchemaError, ValidationMode};

/// Preferred well-known file name
pub const WELL_KNOWN_JSON: &str = "assetlane.config.json";

/// Accepted well-known file name, consulted after the JSON one
pub const WELL_KNOWN_TOML: &str = "assetlane.config.toml";

/// Descriptor file format, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorFormat {
    Json,
    Toml,
}

impl DescriptorFormat {
    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Provenance of a loaded descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// File the descriptor was read from
    pub path: String,

    /// Detected format
    pub format: DescriptorFormat,

    /// SHA-256 digest of the raw file bytes
    pub digest: String,

    /// When the descriptor was loaded
    pub loaded_at: DateTime<Utc>,
}

/// A descriptor together with where it came from
#[derive(Debug, Clone, Serialize)]
pub struct LoadedDescriptor {
    /// Provenance record
    pub source: SourceInfo,

    /// The parsed, structurally valid descriptor
    pub descriptor: DescriptorSet,
}

/// Errors when loading a descriptor file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read descriptor file: {0}")]
    Io(#[from] std::io::Error),

    #[error("descriptor file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "no descriptor file in {} (looked for {json} and {toml})",
        .dir.display(),
        json = WELL_KNOWN_JSON,
        toml = WELL_KNOWN_TOML
    )]
    NotDiscovered { dir: PathBuf },

    #[error("unrecognized descriptor extension: {} (expected .json or .toml)", .0.display())]
    UnknownExtension(PathBuf),

    #[error("descriptor file is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to render TOML: {0}")]
    TomlRender(#[from] toml::ser::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("descriptor file already exists: {} (pass --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
}

impl LoadedDescriptor {
    /// Load, parse, and structurally validate a descriptor file.
    ///
    /// Validation here is lenient; callers wanting fail-fast behavior on
    /// unknown loaders re-validate with [`ValidationMode::Strict`].
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let format = DescriptorFormat::from_path(path)
            .ok_or_else(|| LoadError::UnknownExtension(path.to_path_buf()))?;

        let bytes = fs::read(path)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents =
            String::from_utf8(bytes).map_err(|e| LoadError::Encoding(e.to_string()))?;

        let descriptor: DescriptorSet = match format {
            DescriptorFormat::Json => serde_json::from_str(&contents)?,
            DescriptorFormat::Toml => {
                let value: toml::Value = toml::from_str(&contents)?;
                serde_json::from_value(toml_to_json(value))?
            }
        };

        validate_set(&descriptor, ValidationMode::Lenient)?;

        Ok(Self {
            source: SourceInfo {
                path: path.to_string_lossy().to_string(),
                format,
                digest,
                loaded_at: Utc::now(),
            },
            descriptor,
        })
    }

    /// Find and load the well-known descriptor file in a directory,
    /// preferring the JSON name over the TOML one.
    pub fn discover(dir: &Path) -> Result<Self, LoadError> {
        for name in [WELL_KNOWN_JSON, WELL_KNOWN_TOML] {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }

        Err(LoadError::NotDiscovered {
            dir: dir.to_path_buf(),
        })
    }

    /// Re-validate the loaded descriptor under the given mode
    pub fn validate(&self, mode: ValidationMode) -> Result<(), SchemaError> {
        validate_set(&self.descriptor, mode)
    }

    /// Serialize descriptor plus provenance as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Write a descriptor set to a scaffold file, format by extension.
///
/// TOML files hold a single configuration table, so a multi-config set
/// serializes its first configuration; JSON keeps the full sequence.
pub fn write_scaffold(set: &DescriptorSet, path: &Path, force: bool) -> Result<(), LoadError> {
    if path.exists() && !force {
        return Err(LoadError::AlreadyExists(path.to_path_buf()));
    }

    let format = DescriptorFormat::from_path(path)
        .ok_or_else(|| LoadError::UnknownExtension(path.to_path_buf()))?;

    let rendered = match format {
        DescriptorFormat::Json => {
            let mut text = serde_json::to_string_pretty(set)?;
            text.push('\n');
            text
        }
        DescriptorFormat::Toml => {
            let config = set.configs.first().ok_or(SchemaError::EmptySet)?;
            toml::to_string_pretty(config)?
        }
    };

    fs::write(path, rendered)?;
    Ok(())
}

/// Convert a parsed TOML value into a JSON value for the shared
/// descriptor deserializer
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            Value::Object(map)
        }
    }
}
