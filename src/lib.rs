//! Assetlane - typed bundler-configuration descriptor tooling
//!
//! This crate loads the declarative configuration an external asset
//! bundler consumes (entry files, output artifact, per-file-type
//! transform rules), validates it at load time, and explains which
//! transform chain a given source file would receive.

pub mod config;
pub mod matcher;

pub use assetlane_schema::{
    BuildConfig, DescriptorSet, Output, Rule, SchemaError, TransformKind, TransformStep,
    ValidationMode,
};
pub use config::{BuiltinDefaults, DescriptorFormat, LoadError, LoadedDescriptor};
pub use matcher::{ExplainOutput, Matcher, RuleMatch};
