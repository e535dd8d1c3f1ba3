//! The sentence correction pipeline.
//!
//! Each word token goes through rules, contextual bigrams, exact lexicon
//! lookup and bounded fuzzy search, stopping at the first stage that
//! resolves it. Separators are copied through untouched.

use crate::artifact::{Artifact, Evaluation};
use crate::correction::metrics;
use crate::correction::mode::{Mode, Thresholds};
use crate::correction::result::{CorrectionResult, EditSource, TokenEdit};
use crate::rules::RuleOutcome;
use crate::text::script::{is_single_word, segments, words};

/// Switches and thresholds that shape a [`Corrector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectorOptions {
    pub thresholds: Thresholds,
    /// Consult the whole-sentence table before tokenizing.
    pub sentence_memory: bool,
    /// Consult the previous-word bigram table.
    pub bigrams: bool,
}

impl Default for CorrectorOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            sentence_memory: true,
            bigrams: true,
        }
    }
}

/// Immutable correction engine built from a loaded [`Artifact`].
///
/// `correct` takes `&self`, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Corrector {
    artifact: Artifact,
    options: CorrectorOptions,
}

impl Corrector {
    pub fn new(artifact: Artifact, options: CorrectorOptions) -> Self {
        Self { artifact, options }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn options(&self) -> &CorrectorOptions {
        &self.options
    }

    /// Accuracy figures recorded in the artifact, for display.
    pub fn evaluation(&self) -> Evaluation {
        self.artifact.evaluation
    }

    /// Correct one sentence.
    ///
    /// Never fails: unknown words and non-Bengali text pass through.
    pub fn correct(&self, sentence: &str, mode: Mode) -> CorrectionResult {
        if let Some(result) = self.recall(sentence, mode) {
            return result;
        }

        let mut corrected = String::with_capacity(sentence.len());
        let mut edits = Vec::new();
        let mut previous: Option<&str> = None;
        let mut index = 0;

        for segment in segments(sentence) {
            if !segment.is_word() {
                corrected.push_str(segment.text);
                continue;
            }

            match self.correct_token(segment.text, previous, mode) {
                Some((replacement, source)) => {
                    tracing::debug!(
                        index,
                        token = segment.text,
                        replacement = %replacement,
                        source = ?source,
                        "token corrected"
                    );
                    corrected.push_str(&replacement);
                    edits.push(TokenEdit {
                        index,
                        original: segment.text.to_string(),
                        corrected: replacement,
                        source,
                    });
                }
                None => corrected.push_str(segment.text),
            }

            previous = Some(segment.text);
            index += 1;
        }

        finish(sentence, corrected, mode, edits)
    }

    /// Whole-sentence hit in the sentence memory.
    ///
    /// The stored words are placed back into the input's own separators, so a
    /// hit rewrites words only.
    fn recall(&self, sentence: &str, mode: Mode) -> Option<CorrectionResult> {
        if !self.options.sentence_memory {
            return None;
        }
        let stored = self.artifact.sentences.exact(sentence)?;
        let input = segments(sentence);
        let replacements = words(stored);
        if input.iter().filter(|s| s.is_word()).count() != replacements.len() {
            tracing::debug!(sentence, stored, "sentence memory layout mismatch");
            return None;
        }
        tracing::debug!(sentence, stored, "sentence memory hit");

        let mut corrected = String::with_capacity(sentence.len());
        let mut edits = Vec::new();
        let mut replacements = replacements.into_iter();
        let mut index = 0;
        for segment in input {
            if !segment.is_word() {
                corrected.push_str(segment.text);
                continue;
            }
            let word = replacements.next().unwrap_or(segment.text);
            if word != segment.text {
                edits.push(TokenEdit {
                    index,
                    original: segment.text.to_string(),
                    corrected: word.to_string(),
                    source: EditSource::SentenceMemory,
                });
            }
            corrected.push_str(word);
            index += 1;
        }
        Some(finish(sentence, corrected, mode, edits))
    }

    /// Rule pass for one token. Only a changed single word counts.
    ///
    /// A looser cutoff runs extra rules after the strict ones, and those can
    /// undo a strict rewrite; the strict pass then stands.
    fn apply_rules(&self, token: &str, mode: Mode) -> Option<RuleOutcome> {
        let rules = &self.artifact.rules;
        let thresholds = &self.options.thresholds;
        let usable = |outcome: RuleOutcome| {
            if !outcome.changed(token) {
                return None;
            }
            if is_single_word(&outcome.text) {
                return Some(outcome);
            }
            tracing::debug!(token, output = %outcome.text, "rule output discarded");
            None
        };

        let cutoff = thresholds.rule_confidence(mode);
        let strict = thresholds.rule_confidence(Mode::Conservative);
        usable(rules.apply(token, cutoff))
            .or_else(|| (cutoff < strict).then(|| rules.apply(token, strict)).and_then(&usable))
    }

    /// Resolve one word token. `None` leaves it unchanged.
    fn correct_token(
        &self,
        token: &str,
        previous: Option<&str>,
        mode: Mode,
    ) -> Option<(String, EditSource)> {
        let thresholds = &self.options.thresholds;

        if let Some(outcome) = self.apply_rules(token, mode) {
            return Some((outcome.text, EditSource::Rule { rules: outcome.fired }));
        }

        if self.options.bigrams
            && let Some(prev) = previous
            && let Some(correction) = self.artifact.bigrams.get(prev, token)
        {
            if correction == token {
                return None;
            }
            if is_single_word(correction) {
                return Some((
                    correction.to_string(),
                    EditSource::Bigram {
                        previous: prev.to_string(),
                    },
                ));
            }
            tracing::debug!(token, correction, "bigram correction discarded");
        }

        let lexicon = &self.artifact.lexicon;
        if let Some(canonical) = lexicon.lookup(token) {
            return (canonical != token).then(|| (canonical.to_string(), EditSource::Lexicon));
        }

        let max_distance = thresholds.max_distance(mode);
        if max_distance > 0
            && let Some(found) = lexicon.nearest(token, max_distance)
        {
            return Some((
                found.canonical.to_string(),
                EditSource::Fuzzy {
                    distance: found.distance,
                },
            ));
        }

        None
    }
}

fn finish(original: &str, corrected: String, mode: Mode, edits: Vec<TokenEdit>) -> CorrectionResult {
    let m = metrics::report(original, &corrected);
    CorrectionResult {
        original: original.to_string(),
        corrected,
        edit_distance: m.edit_distance,
        score: m.score,
        mode,
        edits,
    }
}
