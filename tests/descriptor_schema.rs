//! Structural properties of the descriptor model
//!
//! Schema-level checks: one-or-many parsing, non-empty entries and
//! output, rule chain shape, and lossless JSON round-trips.

use assetlane::{
    BuildConfig, DescriptorSet, Output, Rule, TransformKind, TransformStep, ValidationMode,
};
use assetlane_schema::{is_style_chain, script_presets, validate_set};
use serde_json::json;

/// Helper mirroring the reference descriptor shape
fn reference_descriptor() -> DescriptorSet {
    DescriptorSet::single(BuildConfig {
        entries: vec!["./app.scss".to_string(), "./pkg/entry.js".to_string()],
        output: Output {
            filename: "www/bundle.js".to_string(),
        },
        rules: vec![
            Rule::with_steps(
                r"\.scss$",
                vec![
                    TransformStep::with_options(
                        "file-loader",
                        json!({ "name": "www/app.css" }).as_object().cloned().unwrap(),
                    ),
                    TransformStep::new("extract-loader"),
                    TransformStep::new("css-loader"),
                    TransformStep::with_options(
                        "sass-loader",
                        json!({ "includePaths": ["./node_modules"] })
                            .as_object()
                            .cloned()
                            .unwrap(),
                    ),
                ],
            ),
            Rule::with_loader(
                r"\.js$",
                "babel-loader",
                json!({ "presets": ["es2015"] }).as_object().cloned(),
            ),
        ],
    })
}

#[test]
fn descriptor_set_is_nonempty_sequence() {
    let set = reference_descriptor();
    assert!(!set.configs.is_empty());
    assert!(validate_set(&set, ValidationMode::Strict).is_ok());
}

#[test]
fn concrete_scenario_shape() {
    // Entries ["./app.scss", "./pkg/entry.js"], output "www/bundle.js":
    // two entries, the documented output name, and ≥ 2 rules whose
    // patterns match .scss and .js respectively.
    let set = reference_descriptor();
    let config = &set.configs[0];

    assert_eq!(config.entries.len(), 2);
    assert_eq!(config.output.filename, "www/bundle.js");
    assert!(config.rules.len() >= 2);

    let scss = regex_lite::Regex::new(&config.rules[0].test).unwrap();
    let js = regex_lite::Regex::new(&config.rules[1].test).unwrap();
    assert!(scss.is_match("./app.scss"));
    assert!(!scss.is_match("./pkg/entry.js"));
    assert!(js.is_match("./pkg/entry.js"));
}

#[test]
fn style_chain_has_four_transforms_in_documented_order() {
    let set = reference_descriptor();
    let chain = set.configs[0].rules[0].declaration_order();

    let kinds: Vec<TransformKind> = chain.iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TransformKind::FileEmit,
            TransformKind::Extract,
            TransformKind::Css,
            TransformKind::Sass,
        ]
    );
    assert!(is_style_chain(&chain));
}

#[test]
fn script_rule_uses_expected_preset() {
    let set = reference_descriptor();
    let chain = set.configs[0].rules[1].declaration_order();

    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].kind(), TransformKind::Script);
    assert_eq!(script_presets(&chain), Some(vec!["es2015".to_string()]));
}

#[test]
fn every_rule_has_pattern_and_nonempty_chain() {
    let set = reference_descriptor();

    for config in &set.configs {
        for rule in &config.rules {
            assert!(!rule.test.is_empty());
            assert!(!rule.declaration_order().is_empty());
        }
    }
}

#[test]
fn json_round_trip_is_structurally_equal() {
    let set = reference_descriptor();

    let text = serde_json::to_string(&set).unwrap();
    let reparsed: DescriptorSet = serde_json::from_str(&text).unwrap();

    assert_eq!(reparsed, set);
}

#[test]
fn single_object_and_array_forms_parse_equal() {
    let object = json!({
        "entries": ["./app.scss"],
        "output": { "filename": "www/bundle.js" }
    });
    let array = json!([{
        "entries": ["./app.scss"],
        "output": { "filename": "www/bundle.js" }
    }]);

    let from_object: DescriptorSet = serde_json::from_value(object).unwrap();
    let from_array: DescriptorSet = serde_json::from_value(array).unwrap();

    assert_eq!(from_object, from_array);
    assert_eq!(from_object.configs.len(), 1);
}

#[test]
fn legacy_query_key_round_trips_as_options() {
    let value = json!({
        "entries": ["./pkg/entry.js"],
        "output": { "filename": "www/bundle.js" },
        "rules": [
            { "test": "\\.js$", "loader": "babel-loader",
              "query": { "presets": ["es2015"] } }
        ]
    });

    let set: DescriptorSet = serde_json::from_value(value).unwrap();
    let rule = &set.configs[0].rules[0];
    assert!(rule.options.is_some());

    // Re-serialization uses the modern key.
    let text = serde_json::to_string(&set).unwrap();
    assert!(text.contains("\"options\""));
    assert!(!text.contains("\"query\""));
}

#[test]
fn options_bags_are_opaque() {
    // Unrecognized option keys pass through untouched; only the named
    // external tool interprets them.
    let value = json!({
        "entries": ["./app.scss"],
        "output": { "filename": "www/bundle.js" },
        "rules": [
            { "test": "\\.scss$",
              "use": [
                  { "loader": "sass-loader",
                    "options": { "includePaths": ["./node_modules"],
                                 "futureOption": { "nested": true } } }
              ] }
        ]
    });

    let set: DescriptorSet = serde_json::from_value(value).unwrap();
    let chain = set.configs[0].rules[0].declaration_order();
    let options = chain[0].options.as_ref().unwrap();

    assert_eq!(options["futureOption"]["nested"], json!(true));
    assert!(validate_set(&set, ValidationMode::Strict).is_ok());
}
