//! Explain command output for rule matching
//!
//! Provides structured JSON and human-readable explanations of which
//! transform chain a source file receives, for diagnostic purposes.

use serde::Serialize;

use super::{Matcher, RuleMatch};

/// Explanation of a rule-table lookup for one source path
#[derive(Debug, Clone, Serialize)]
pub struct ExplainOutput {
    /// The path that was looked up
    pub input_path: String,

    /// Which configuration in the descriptor set was consulted
    pub config_index: usize,

    /// Whether any rule matched
    pub matched: bool,

    /// The winning rule under first-match resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_match: Option<RuleMatch>,

    /// Every matching rule, present when cascade visibility was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_matches: Option<Vec<RuleMatch>>,

    /// Human-readable explanation
    pub explanation: String,
}

impl ExplainOutput {
    /// Run the lookup and build the explanation
    pub fn from_lookup(matcher: &Matcher, path: &str, config_index: usize, all: bool) -> Self {
        let first_match = matcher.match_first(path);
        let all_matches = all.then(|| matcher.match_all(path));

        let explanation =
            Self::generate_explanation(path, first_match.as_ref(), all_matches.as_deref());

        Self {
            input_path: path.to_string(),
            config_index,
            matched: first_match.is_some(),
            first_match,
            all_matches,
            explanation,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The human-readable rendering
    pub fn to_human(&self) -> &str {
        &self.explanation
    }

    fn generate_explanation(
        path: &str,
        first: Option<&RuleMatch>,
        all: Option<&[RuleMatch]>,
    ) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Path: {}", path));
        lines.push(String::new());

        match first {
            Some(matched) => {
                lines.push(format!(
                    "Matched rule {} (pattern '{}')",
                    matched.rule_index, matched.pattern
                ));
                lines.push(String::new());
                lines.push("Declared chain:".to_string());
                for step in &matched.declaration_order {
                    lines.push(format!("  - {}", step.loader));
                }
                lines.push(String::new());
                lines.push("Applied order (last declared runs first):".to_string());
                for (position, step) in matched.application_order.iter().enumerate() {
                    lines.push(format!("  {}. {}", position + 1, step.loader));
                }
            }
            None => {
                lines.push("No rule matches; the bundler passes the file through untransformed."
                    .to_string());
            }
        }

        if let Some(all) = all {
            if all.len() > 1 {
                lines.push(String::new());
                lines.push(format!("Cascade: {} rules match", all.len()));
                for matched in all {
                    lines.push(format!(
                        "  rule {} (pattern '{}')",
                        matched.rule_index, matched.pattern
                    ));
                }
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetlane_schema::{BuildConfig, Output, Rule, TransformStep};

    fn matcher() -> Matcher {
        let config = BuildConfig {
            entries: vec!["./app.scss".to_string()],
            output: Output {
                filename: "www/bundle.js".to_string(),
            },
            rules: vec![
                Rule::with_steps(
                    r"\.scss$",
                    vec![
                        TransformStep::new("file-loader"),
                        TransformStep::new("sass-loader"),
                    ],
                ),
                Rule::with_loader(r"app", "babel-loader", None),
            ],
        };
        Matcher::new(&config, 0).unwrap()
    }

    #[test]
    fn test_matched_explanation_lists_both_orders() {
        let output = ExplainOutput::from_lookup(&matcher(), "./app.scss", 0, false);

        assert!(output.matched);
        assert_eq!(output.first_match.as_ref().unwrap().rule_index, 0);
        assert!(output.explanation.contains("Declared chain:"));
        assert!(output.explanation.contains("1. sass-loader"));
        assert!(output.all_matches.is_none());
    }

    #[test]
    fn test_unmatched_explanation() {
        let output = ExplainOutput::from_lookup(&matcher(), "./logo.svg", 0, false);

        assert!(!output.matched);
        assert!(output.first_match.is_none());
        assert!(output.explanation.contains("No rule matches"));
    }

    #[test]
    fn test_cascade_reported_when_requested() {
        let output = ExplainOutput::from_lookup(&matcher(), "./app.scss", 0, true);

        let all = output.all_matches.as_ref().unwrap();
        assert_eq!(all.len(), 2);
        assert!(output.explanation.contains("Cascade: 2 rules match"));
    }

    #[test]
    fn test_json_serializes_without_empty_fields() {
        let output = ExplainOutput::from_lookup(&matcher(), "./logo.svg", 0, false);
        let json = output.to_json().unwrap();

        assert!(json.contains("\"matched\": false"));
        assert!(!json.contains("first_match"));
        assert!(!json.contains("all_matches"));
    }
}
