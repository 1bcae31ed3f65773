//! Built-in default descriptor
//!
//! The shape a freshly scaffolded project gets: one configuration with a
//! style entry and a script entry, a four-step style pipeline that emits
//! a named CSS file, and a script rule lowering modern syntax through a
//! named preset.

use serde::{Deserialize, Serialize};
use serde_json::json;

use assetlane_schema::{BuildConfig, DescriptorSet, Output, Rule, TransformStep};

/// Tunable values behind the default descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Entry roots (default: a style root and a script root)
    pub entries: Vec<String>,

    /// Primary bundle path (default: "dist/bundle.js")
    pub output_filename: String,

    /// Name template the file-emission step writes the compiled
    /// stylesheet to (default: "dist/app.css")
    pub css_filename: String,

    /// Additional module-search paths for the Sass compiler
    /// (default: ["./node_modules"])
    pub sass_include_paths: Vec<String>,

    /// Presets for the script-syntax transform (default: ["es2015"])
    pub script_presets: Vec<String>,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            entries: vec!["./app.scss".to_string(), "./src/index.js".to_string()],
            output_filename: "dist/bundle.js".to_string(),
            css_filename: "dist/app.css".to_string(),
            sass_include_paths: vec!["./node_modules".to_string()],
            script_presets: vec!["es2015".to_string()],
        }
    }
}

impl BuiltinDefaults {
    /// Materialize the default descriptor set.
    ///
    /// Chains are declared in the order the bundler expects and applied
    /// right-to-left: the style pipeline runs Sass compilation first and
    /// file emission last.
    pub fn to_descriptor_set(&self) -> DescriptorSet {
        let style_rule = Rule::with_steps(
            r"\.scss$",
            vec![
                TransformStep::with_options(
                    "file-loader",
                    json!({ "name": self.css_filename })
                        .as_object()
                        .cloned()
                        .unwrap_or_default(),
                ),
                TransformStep::new("extract-loader"),
                TransformStep::new("css-loader"),
                TransformStep::with_options(
                    "sass-loader",
                    json!({ "includePaths": self.sass_include_paths })
                        .as_object()
                        .cloned()
                        .unwrap_or_default(),
                ),
            ],
        );

        let script_rule = Rule::with_loader(
            r"\.js$",
            "babel-loader",
            json!({ "presets": self.script_presets }).as_object().cloned(),
        );

        DescriptorSet::single(BuildConfig {
            entries: self.entries.clone(),
            output: Output {
                filename: self.output_filename.clone(),
            },
            rules: vec![style_rule, script_rule],
        })
    }
}
