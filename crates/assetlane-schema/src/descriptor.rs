//! Descriptor data model
//!
//! Mirrors the shape an external bundler reads from its well-known config
//! file: a sequence of build configurations, each with entry roots, one
//! output artifact, and an ordered rule table. Transform chains are stored
//! in declaration order; the bundler applies them right-to-left (last
//! declared step runs first), and [`Rule::application_order`] exposes that
//! ordering explicitly.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::transform::TransformKind;

/// Opaque option bag for a transform step.
///
/// Validated only by the named external tool, never by this crate.
pub type Options = Map<String, Value>;

/// Top-level descriptor value: a non-empty ordered sequence of build
/// configurations.
///
/// Bundlers accept either a single configuration object or an array of
/// them; deserialization normalizes both forms to a sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DescriptorSet {
    /// Configurations in declaration order
    pub configs: Vec<BuildConfig>,
}

impl<'de> Deserialize<'de> for DescriptorSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Branch on the value shape rather than using an untagged enum, so
        // a malformed config reports its actual field error instead of
        // "data did not match any variant".
        let value = Value::deserialize(deserializer)?;

        let configs = match value {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<BuildConfig>, _>>()
                .map_err(serde::de::Error::custom)?,
            other => vec![serde_json::from_value(other).map_err(serde::de::Error::custom)?],
        };

        Ok(Self { configs })
    }
}

impl DescriptorSet {
    /// Wrap a single configuration
    pub fn single(config: BuildConfig) -> Self {
        Self {
            configs: vec![config],
        }
    }
}

/// One build configuration: entry roots, output artifact, rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Source files the bundler starts dependency resolution from.
    /// Each entry is an independent root; order is preserved.
    #[serde(alias = "entry")]
    pub entries: Vec<String>,

    /// Primary emitted bundle
    pub output: Output,

    /// Transformation rules, evaluated in declaration order
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Output artifact descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Path of the primary emitted bundle
    pub filename: String,
}

/// A (pattern → transform chain) pairing.
///
/// A rule declares its chain either as `use` (ordered multi-step form) or
/// as `loader` plus optional `options` (one-step shorthand). Exactly one
/// form must be present; validation enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Regular-expression pattern over file paths selecting which source
    /// files this rule applies to
    pub test: String,

    /// One-step shorthand: loader name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,

    /// One-step shorthand: options for `loader`.
    /// `query` is the legacy spelling some configs still carry.
    #[serde(default, alias = "query", skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,

    /// Multi-step chain in declaration order
    #[serde(default, rename = "use", skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<TransformStep>>,
}

impl Rule {
    /// Multi-step rule with the given chain
    pub fn with_steps(test: impl Into<String>, steps: Vec<TransformStep>) -> Self {
        Self {
            test: test.into(),
            loader: None,
            options: None,
            steps: Some(steps),
        }
    }

    /// One-step shorthand rule
    pub fn with_loader(
        test: impl Into<String>,
        loader: impl Into<String>,
        options: Option<Options>,
    ) -> Self {
        Self {
            test: test.into(),
            loader: Some(loader.into()),
            options,
            steps: None,
        }
    }

    /// The chain in declaration order, with the one-step shorthand
    /// normalized to a single-element chain.
    ///
    /// Returns an empty chain when neither form is declared; validation
    /// rejects that case.
    pub fn declaration_order(&self) -> Vec<TransformStep> {
        if let Some(ref steps) = self.steps {
            return steps.clone();
        }
        match self.loader {
            Some(ref loader) => vec![TransformStep {
                loader: loader.clone(),
                options: self.options.clone(),
            }],
            None => Vec::new(),
        }
    }

    /// The chain in application order: the bundler runs the last declared
    /// step first, so this is [`Rule::declaration_order`] reversed.
    pub fn application_order(&self) -> Vec<TransformStep> {
        let mut steps = self.declaration_order();
        steps.reverse();
        steps
    }
}

/// A single named transform step with its opaque options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStep {
    /// String identifier of the external transform tool
    pub loader: String,

    /// Opaque key/value bag passed through to the tool.
    /// `query` is the legacy spelling.
    #[serde(default, alias = "query", skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

impl TransformStep {
    /// Step with no options
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: None,
        }
    }

    /// Step with an options bag
    pub fn with_options(loader: impl Into<String>, options: Options) -> Self {
        Self {
            loader: loader.into(),
            options: Some(options),
        }
    }

    /// Classify the loader identifier
    pub fn kind(&self) -> TransformKind {
        TransformKind::from_loader(&self.loader)
    }
}
