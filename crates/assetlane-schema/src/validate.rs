//! Structural validation
//!
//! A descriptor owns no build-time failure handling (the bundler and the
//! named tools report those), but malformed structure is rejected here at
//! load time: empty entry lists, empty output names, patterns that do not
//! compile, empty or doubly-declared chains. Strict mode additionally
//! rejects loader identifiers outside the recognized set.

use regex_lite::Regex;

use crate::descriptor::{BuildConfig, DescriptorSet, Rule, TransformStep};
use crate::transform::TransformKind;

/// Validation failures for a descriptor
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("descriptor set is empty")]
    EmptySet,

    #[error("config {index}: entry list is empty")]
    NoEntries { index: usize },

    #[error("config {index}: entry {position} is empty")]
    EmptyEntry { index: usize, position: usize },

    #[error("config {index}: output filename is empty")]
    EmptyOutputFilename { index: usize },

    #[error("config {index}, rule {rule}: invalid test pattern '{pattern}': {reason}")]
    InvalidPattern {
        index: usize,
        rule: usize,
        pattern: String,
        reason: String,
    },

    #[error("config {index}, rule {rule}: must declare exactly one of 'use' or 'loader'")]
    AmbiguousChain { index: usize, rule: usize },

    #[error("config {index}, rule {rule}: top-level 'options' belongs to the 'loader' shorthand; move them into the 'use' step")]
    StrandedOptions { index: usize, rule: usize },

    #[error("config {index}, rule {rule}: transform chain is empty")]
    EmptyChain { index: usize, rule: usize },

    #[error("config {index}, rule {rule}: loader '{loader}' is empty")]
    EmptyLoader {
        index: usize,
        rule: usize,
        loader: String,
    },

    #[error("config {index}, rule {rule}: unknown loader '{loader}'")]
    UnknownLoader {
        index: usize,
        rule: usize,
        loader: String,
    },
}

/// How to treat loader identifiers outside the recognized set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Unknown loaders pass through untouched
    #[default]
    Lenient,

    /// Unknown loaders fail validation
    Strict,
}

/// Validate a whole descriptor set
pub fn validate_set(set: &DescriptorSet, mode: ValidationMode) -> Result<(), SchemaError> {
    if set.configs.is_empty() {
        return Err(SchemaError::EmptySet);
    }

    for (index, config) in set.configs.iter().enumerate() {
        validate_config(config, index, mode)?;
    }

    Ok(())
}

fn validate_config(
    config: &BuildConfig,
    index: usize,
    mode: ValidationMode,
) -> Result<(), SchemaError> {
    if config.entries.is_empty() {
        return Err(SchemaError::NoEntries { index });
    }

    for (position, entry) in config.entries.iter().enumerate() {
        if entry.is_empty() {
            return Err(SchemaError::EmptyEntry { index, position });
        }
    }

    if config.output.filename.is_empty() {
        return Err(SchemaError::EmptyOutputFilename { index });
    }

    for (rule_index, rule) in config.rules.iter().enumerate() {
        validate_rule(rule, index, rule_index, mode)?;
    }

    Ok(())
}

fn validate_rule(
    rule: &Rule,
    index: usize,
    rule_index: usize,
    mode: ValidationMode,
) -> Result<(), SchemaError> {
    compile_test(rule, index, rule_index)?;

    if rule.steps.is_some() && rule.loader.is_some() {
        return Err(SchemaError::AmbiguousChain {
            index,
            rule: rule_index,
        });
    }

    // A multi-step chain never reads the rule-level options bag;
    // normalization would drop it on the floor.
    if rule.steps.is_some() && rule.options.is_some() {
        return Err(SchemaError::StrandedOptions {
            index,
            rule: rule_index,
        });
    }

    let chain = rule.declaration_order();
    if chain.is_empty() {
        return Err(SchemaError::EmptyChain {
            index,
            rule: rule_index,
        });
    }

    for step in &chain {
        if step.loader.is_empty() {
            return Err(SchemaError::EmptyLoader {
                index,
                rule: rule_index,
                loader: step.loader.clone(),
            });
        }

        if mode == ValidationMode::Strict && !step.kind().is_known() {
            return Err(SchemaError::UnknownLoader {
                index,
                rule: rule_index,
                loader: step.loader.clone(),
            });
        }
    }

    Ok(())
}

/// Compile a rule's test pattern
pub fn compile_test(rule: &Rule, index: usize, rule_index: usize) -> Result<Regex, SchemaError> {
    Regex::new(&rule.test).map_err(|e| SchemaError::InvalidPattern {
        index,
        rule: rule_index,
        pattern: rule.test.clone(),
        reason: e.to_string(),
    })
}

/// Whether a chain (in declaration order) is the expected style pipeline:
/// file-emission → extraction → CSS resolution → Sass compilation,
/// applied right-to-left by the bundler.
pub fn is_style_chain(chain: &[TransformStep]) -> bool {
    let expected = [
        TransformKind::FileEmit,
        TransformKind::Extract,
        TransformKind::Css,
        TransformKind::Sass,
    ];

    chain.len() == expected.len()
        && chain
            .iter()
            .zip(expected.iter())
            .all(|(step, kind)| step.kind() == *kind)
}

/// Extract the preset list from a script-syntax chain, if the chain's
/// sole step is the script transform carrying a `presets` option.
pub fn script_presets(chain: &[TransformStep]) -> Option<Vec<String>> {
    let step = match chain {
        [step] if step.kind() == TransformKind::Script => step,
        _ => return None,
    };

    let presets = step.options.as_ref()?.get("presets")?.as_array()?;
    Some(
        presets
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}
