//! Ordered rule set applied to one token at a time.

use crate::rules::rule::{Rule, RuleError, RuleSpec};

/// Output of one pass over the rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub text: String,
    /// Labels of the rules that rewrote the token, in application order.
    pub fired: Vec<String>,
}

impl RuleOutcome {
    /// Whether the pass produced text different from its input.
    pub fn changed(&self, input: &str) -> bool {
        self.text != input
    }
}

/// Deterministic substitution rules, sorted by ascending priority.
///
/// Equal priorities keep artifact order, so the first listed rule wins when
/// two rules overlap.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new<I>(specs: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = RuleSpec>,
    {
        let mut rules = specs
            .into_iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        // Stable: ties stay in artifact order.
        rules.sort_by_key(Rule::priority);
        Ok(Self { rules })
    }

    /// Run a single pass of every rule with confidence ≥ `min_confidence`.
    ///
    /// Each rule is tried exactly once, against the output of the rules
    /// before it, which bounds the work and guarantees termination.
    pub fn apply(&self, token: &str, min_confidence: f32) -> RuleOutcome {
        let mut text = token.to_string();
        let mut fired = Vec::new();

        for rule in self.rules.iter().filter(|r| r.confidence() >= min_confidence) {
            if let Some(rewritten) = rule.rewrite(&text)
                && rewritten != text
            {
                tracing::trace!(rule = rule.label(), from = %text, to = %rewritten, "rule fired");
                text = rewritten;
                fired.push(rule.label().to_string());
            }
        }

        RuleOutcome { text, fired }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules active at `min_confidence`.
    pub fn active_count(&self, min_confidence: f32) -> usize {
        self.rules
            .iter()
            .filter(|r| r.confidence() >= min_confidence)
            .count()
    }
}
