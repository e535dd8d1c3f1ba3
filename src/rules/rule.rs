//! A single substitution rule and its compiled form.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where in a token a rule may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Prefix,
    Suffix,
    #[default]
    Anywhere,
}

/// How `pattern` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    Literal,
    Regex,
}

/// A rule as written in the artifact manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Optional label used in edit reports. Defaults to the pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub pattern: String,
    pub replacement: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub priority: i32,
    pub confidence: f32,
    #[serde(default)]
    pub kind: PatternKind,
}

/// Why a rule could not be compiled.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule '{label}': pattern is empty")]
    EmptyPattern { label: String },

    #[error("rule '{label}': confidence {confidence} is outside [0, 1]")]
    Confidence { label: String, confidence: f32 },

    #[error("rule '{label}': invalid regex: {source}")]
    Regex {
        label: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{label}': regex matches the empty string")]
    MatchesEmpty { label: String },
}

#[derive(Debug, Clone)]
enum Matcher {
    Literal(String),
    Regex(Regex),
}

/// A validated, ready-to-apply rule.
#[derive(Debug, Clone)]
pub struct Rule {
    label: String,
    matcher: Matcher,
    replacement: String,
    scope: Scope,
    priority: i32,
    confidence: f32,
}

impl Rule {
    pub fn compile(spec: RuleSpec) -> Result<Self, RuleError> {
        let label = spec.name.clone().unwrap_or_else(|| spec.pattern.clone());

        if spec.pattern.is_empty() {
            return Err(RuleError::EmptyPattern { label });
        }
        if !(0.0..=1.0).contains(&spec.confidence) {
            return Err(RuleError::Confidence {
                label,
                confidence: spec.confidence,
            });
        }

        let matcher = match spec.kind {
            PatternKind::Literal => Matcher::Literal(spec.pattern),
            PatternKind::Regex => {
                let anchored = match spec.scope {
                    Scope::Prefix => format!("^(?:{})", spec.pattern),
                    Scope::Suffix => format!("(?:{})$", spec.pattern),
                    Scope::Anywhere => spec.pattern.clone(),
                };
                let re = Regex::new(&anchored).map_err(|source| RuleError::Regex {
                    label: label.clone(),
                    source,
                })?;
                if re.is_match("") {
                    return Err(RuleError::MatchesEmpty { label });
                }
                Matcher::Regex(re)
            }
        };

        Ok(Self {
            label,
            matcher,
            replacement: spec.replacement,
            scope: spec.scope,
            priority: spec.priority,
            confidence: spec.confidence,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Rewrite `token` once. Returns `None` when the rule does not match.
    ///
    /// `Anywhere` rules replace every non-overlapping match in one scan;
    /// prefix and suffix rules replace their single anchored match.
    pub fn rewrite(&self, token: &str) -> Option<String> {
        match &self.matcher {
            Matcher::Literal(pattern) => match self.scope {
                Scope::Prefix => token
                    .strip_prefix(pattern.as_str())
                    .map(|rest| format!("{}{}", self.replacement, rest)),
                Scope::Suffix => token
                    .strip_suffix(pattern.as_str())
                    .map(|rest| format!("{}{}", rest, self.replacement)),
                Scope::Anywhere => token
                    .contains(pattern.as_str())
                    .then(|| token.replace(pattern.as_str(), &self.replacement)),
            },
            Matcher::Regex(re) => {
                if !re.is_match(token) {
                    return None;
                }
                let out = match self.scope {
                    Scope::Anywhere => re.replace_all(token, self.replacement.as_str()),
                    Scope::Prefix | Scope::Suffix => re.replace(token, self.replacement.as_str()),
                };
                Some(out.into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(pattern: &str, replacement: &str, scope: Scope) -> Rule {
        Rule::compile(RuleSpec {
            name: None,
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            scope,
            priority: 0,
            confidence: 1.0,
            kind: PatternKind::Literal,
        })
        .unwrap()
    }

    fn regex(pattern: &str, replacement: &str, scope: Scope) -> Result<Rule, RuleError> {
        Rule::compile(RuleSpec {
            name: Some("re".to_string()),
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            scope,
            priority: 0,
            confidence: 0.5,
            kind: PatternKind::Regex,
        })
    }

    #[test]
    fn literal_anywhere_replaces_all_occurrences() {
        let rule = literal("ঈ", "ই", Scope::Anywhere);
        assert_eq!(rule.rewrite("ঈঈদ").as_deref(), Some("ইইদ"));
        assert_eq!(rule.rewrite("ইদ"), None);
    }

    #[test]
    fn literal_prefix_only_at_start() {
        let rule = literal("অ", "", Scope::Prefix);
        assert_eq!(rule.rewrite("অকাল").as_deref(), Some("কাল"));
        assert_eq!(rule.rewrite("কঅ"), None);
    }

    #[test]
    fn literal_suffix_only_at_end() {
        let rule = literal("েন", "েনে", Scope::Suffix);
        assert_eq!(rule.rewrite("করেন").as_deref(), Some("করেনে"));
        assert_eq!(rule.rewrite("েনক"), None);
    }

    #[test]
    fn rewrite_does_not_rescan_its_output() {
        // Replacement contains the pattern; one application must terminate.
        let rule = literal("ক", "কক", Scope::Anywhere);
        assert_eq!(rule.rewrite("ক").as_deref(), Some("কক"));
    }

    #[test]
    fn regex_scopes_are_anchored() {
        let prefix = regex("ক+", "খ", Scope::Prefix).unwrap();
        assert_eq!(prefix.rewrite("কককা").as_deref(), Some("খা"));
        assert_eq!(prefix.rewrite("াক"), None);

        let suffix = regex("(ে|ো)$|ই", "X", Scope::Suffix).unwrap();
        assert_eq!(suffix.rewrite("কই").as_deref(), Some("কX"));
        assert_eq!(suffix.rewrite("ইক"), None);
    }

    #[test]
    fn regex_anywhere_supports_groups() {
        let rule = regex("(ক)(খ)", "$2$1", Scope::Anywhere).unwrap();
        assert_eq!(rule.rewrite("কখ কখ").as_deref(), Some("খক খক"));
    }

    #[test]
    fn rejects_invalid_specs() {
        assert!(matches!(
            regex("(", "x", Scope::Anywhere),
            Err(RuleError::Regex { .. })
        ));
        assert!(matches!(
            regex("ক*", "x", Scope::Anywhere),
            Err(RuleError::MatchesEmpty { .. })
        ));
        let empty = Rule::compile(RuleSpec {
            name: None,
            pattern: String::new(),
            replacement: "x".into(),
            scope: Scope::Anywhere,
            priority: 0,
            confidence: 1.0,
            kind: PatternKind::Literal,
        });
        assert!(matches!(empty, Err(RuleError::EmptyPattern { .. })));
        let bad_conf = Rule::compile(RuleSpec {
            name: None,
            pattern: "ক".into(),
            replacement: "খ".into(),
            scope: Scope::Anywhere,
            priority: 0,
            confidence: 1.5,
            kind: PatternKind::Literal,
        });
        assert!(matches!(bad_conf, Err(RuleError::Confidence { .. })));
    }

    #[test]
    fn spec_deserializes_with_defaults() {
        let spec: RuleSpec = toml::from_str(
            r#"
            pattern = "ঁা"
            replacement = "াঁ"
            confidence = 0.95
            "#,
        )
        .unwrap();
        assert_eq!(spec.scope, Scope::Anywhere);
        assert_eq!(spec.kind, PatternKind::Literal);
        assert_eq!(spec.priority, 0);
        assert!(spec.name.is_none());
    }
}
