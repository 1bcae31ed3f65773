//! Typed descriptor model for external asset-bundler configuration.
//!
//! An external bundler consumes a declarative descriptor: entry files,
//! one output artifact, and an ordered table of (file-pattern →
//! transform chain) rules. This crate models that descriptor as strongly
//! typed data, makes the chain's right-to-left application convention
//! explicit, and validates structure at load time instead of relying on
//! the bundler's implicit tolerance.

pub mod descriptor;
pub mod transform;
pub mod validate;

pub use descriptor::{BuildConfig, DescriptorSet, Output, Rule, TransformStep};
pub use transform::TransformKind;
pub use validate::{is_style_chain, script_presets, validate_set, SchemaError, ValidationMode};
