//! Rule matching
//!
//! Evaluates a configuration's rule table against a source-file path the
//! way the external bundler does: rules in declaration order, a rule
//! matching when its `test` pattern matches the path. First-match
//! resolution answers "which chain does this file get"; all-match
//! enumeration makes intentional rule cascades visible.

mod explain;

pub use explain::ExplainOutput;

use regex_lite::Regex;
use serde::Serialize;

use assetlane_schema::validate::compile_test;
use assetlane_schema::{BuildConfig, Rule, SchemaError, TransformStep};

/// A rule table with its patterns compiled
#[derive(Debug)]
pub struct Matcher {
    rules: Vec<CompiledRule>,
}

#[derive(Debug)]
struct CompiledRule {
    pattern: Regex,
    rule: Rule,
}

/// One rule that matched a path
#[derive(Debug, Clone, Serialize)]
pub struct RuleMatch {
    /// Position of the rule in the table (declaration order)
    pub rule_index: usize,

    /// The rule's test pattern
    pub pattern: String,

    /// Chain as declared
    pub declaration_order: Vec<TransformStep>,

    /// Chain as the bundler applies it (last declared step first)
    pub application_order: Vec<TransformStep>,
}

impl Matcher {
    /// Compile a configuration's rule table.
    ///
    /// The config index is only used to label pattern errors.
    pub fn new(config: &BuildConfig, config_index: usize) -> Result<Self, SchemaError> {
        let mut rules = Vec::with_capacity(config.rules.len());

        for (rule_index, rule) in config.rules.iter().enumerate() {
            let pattern = compile_test(rule, config_index, rule_index)?;
            rules.push(CompiledRule {
                pattern,
                rule: rule.clone(),
            });
        }

        Ok(Self { rules })
    }

    /// The first rule whose pattern matches the path
    pub fn match_first(&self, path: &str) -> Option<RuleMatch> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, compiled)| compiled.pattern.is_match(path))
            .map(|(index, compiled)| Self::to_match(index, compiled))
    }

    /// Every rule whose pattern matches the path, in declaration order
    pub fn match_all(&self, path: &str) -> Vec<RuleMatch> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, compiled)| compiled.pattern.is_match(path))
            .map(|(index, compiled)| Self::to_match(index, compiled))
            .collect()
    }

    fn to_match(index: usize, compiled: &CompiledRule) -> RuleMatch {
        RuleMatch {
            rule_index: index,
            pattern: compiled.rule.test.clone(),
            declaration_order: compiled.rule.declaration_order(),
            application_order: compiled.rule.application_order(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetlane_schema::{Output, Rule};

    fn config() -> BuildConfig {
        BuildConfig {
            entries: vec!["./app.scss".to_string()],
            output: Output {
                filename: "www/bundle.js".to_string(),
            },
            rules: vec![
                Rule::with_steps(
                    r"\.scss$",
                    vec![
                        TransformStep::new("file-loader"),
                        TransformStep::new("extract-loader"),
                        TransformStep::new("css-loader"),
                        TransformStep::new("sass-loader"),
                    ],
                ),
                Rule::with_loader(r"\.js$", "babel-loader", None),
                // Overlaps the script rule; declared later, so first-match
                // resolution never picks it for plain .js paths.
                Rule::with_loader(r"min\.js$", "noop-loader", None),
            ],
        }
    }

    #[test]
    fn test_first_match_wins_by_declaration_order() {
        let matcher = Matcher::new(&config(), 0).unwrap();

        let matched = matcher.match_first("./vendor/lib.min.js").unwrap();
        assert_eq!(matched.rule_index, 1);
        assert_eq!(matched.declaration_order[0].loader, "babel-loader");
    }

    #[test]
    fn test_all_matches_show_cascade() {
        let matcher = Matcher::new(&config(), 0).unwrap();

        let all = matcher.match_all("./vendor/lib.min.js");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].rule_index, 1);
        assert_eq!(all[1].rule_index, 2);
    }

    #[test]
    fn test_no_match_for_unrouted_extension() {
        let matcher = Matcher::new(&config(), 0).unwrap();
        assert!(matcher.match_first("./logo.svg").is_none());
        assert!(matcher.match_all("./logo.svg").is_empty());
    }

    #[test]
    fn test_match_exposes_both_orderings() {
        let matcher = Matcher::new(&config(), 0).unwrap();

        let matched = matcher.match_first("./app.scss").unwrap();
        assert_eq!(matched.declaration_order.len(), 4);
        assert_eq!(matched.declaration_order[0].loader, "file-loader");
        assert_eq!(matched.application_order[0].loader, "sass-loader");
    }

    #[test]
    fn test_bad_pattern_surfaces_rule_position() {
        let mut config = config();
        config.rules[2].test = "(".to_string();

        let result = Matcher::new(&config, 3);
        match result {
            Err(SchemaError::InvalidPattern { index, rule, .. }) => {
                assert_eq!(index, 3);
                assert_eq!(rule, 2);
            }
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }
}
