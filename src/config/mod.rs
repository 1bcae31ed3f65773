//! Descriptor loading
//!
//! Two sources, in the order the CLI consults them:
//! 1. An explicit `-c FILE` path (JSON or TOML by extension)
//! 2. A well-known file name discovered in the working directory
//!    (`assetlane.config.json`, then `assetlane.config.toml`)
//!
//! Loaded descriptors carry provenance: source path, content digest,
//! format, and load timestamp. Builtin defaults exist only for `init`
//! scaffolding and as the reference shape for chain lints; a missing
//! descriptor file is an error, never silently defaulted.

mod defaults;
mod loaded;

pub use defaults::BuiltinDefaults;
pub use loaded::{
    write_scaffold, DescriptorFormat, LoadError, LoadedDescriptor, SourceInfo, WELL_KNOWN_JSON,
    WELL_KNOWN_TOML,
};
