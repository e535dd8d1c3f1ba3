//! Terminal and JSON rendering of correction results.

use crate::correction::{CorrectionResult, Corrector, Mode};
use crate::error::Result;
use crate::text::script::segments;
use owo_colors::OwoColorize;
use std::collections::HashMap;

fn struck(word: &str, color: bool) -> String {
    if color {
        format!("{}", format!("[{word}]").strikethrough().dimmed())
    } else {
        format!("[{word}]")
    }
}

fn replaced(word: &str, color: bool) -> String {
    if color {
        word.green().to_string()
    } else {
        word.to_string()
    }
}

/// The corrected sentence with each replaced word shown as the struck-out
/// original followed by its replacement.
pub fn mark_edits(result: &CorrectionResult, color: bool) -> String {
    let by_index: HashMap<usize, &str> = result
        .edits
        .iter()
        .map(|e| (e.index, e.corrected.as_str()))
        .collect();

    let mut out = String::with_capacity(result.corrected.len() * 2);
    let mut index = 0;
    for segment in segments(&result.original) {
        if !segment.is_word() {
            out.push_str(segment.text);
            continue;
        }
        match by_index.get(&index) {
            Some(replacement) => {
                out.push_str(&struck(segment.text, color));
                out.push_str(&replaced(replacement, color));
            }
            None => out.push_str(segment.text),
        }
        index += 1;
    }
    out
}

fn stats_line(result: &CorrectionResult) -> String {
    format!(
        "distance: {}  score: {:.3}  mode: {}",
        result.edit_distance, result.score, result.mode
    )
}

/// Plain corrected sentence, or the marked-up form plus a stats line.
pub fn render_text(result: &CorrectionResult, color: bool, details: bool) -> String {
    if !details {
        return result.corrected.clone();
    }
    let stats = stats_line(result);
    let stats = if color {
        stats.dimmed().to_string()
    } else {
        stats
    };
    format!("{}\n{}", mark_edits(result, color), stats)
}

/// One JSON object per result, on a single line.
pub fn render_json(result: &CorrectionResult) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}

/// Both modes for the same input, one block each.
pub fn render_comparison(results: &[CorrectionResult], color: bool) -> String {
    let mut lines = Vec::with_capacity(results.len() * 2);
    for result in results {
        let label = format!("{:>12}:", result.mode.as_str());
        let label = if color {
            label.bold().to_string()
        } else {
            label
        };
        lines.push(format!("{} {}", label, mark_edits(result, color)));
        lines.push(format!("{:>13} {}", "", stats_line(result)));
    }
    lines.join("\n")
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}%", v * 100.0))
}

/// Artifact summary for `shuddho inspect`.
pub fn render_summary(corrector: &Corrector) -> String {
    let artifact = corrector.artifact();
    let thresholds = corrector.options().thresholds;
    let evaluation = corrector.evaluation();
    let source = artifact
        .source
        .as_ref()
        .map_or_else(|| "(in memory)".to_string(), |p| p.display().to_string());

    let mut lines = vec![
        format!("artifact:     {}", source),
        format!("entries:      {}", artifact.lexicon.len()),
        format!("vocabulary:   {}", artifact.lexicon.vocabulary_len()),
    ];
    lines.push(format!(
        "rules:        {} ({} conservative, {} aggressive)",
        artifact.rules.len(),
        artifact
            .rules
            .active_count(thresholds.rule_confidence(Mode::Conservative)),
        artifact
            .rules
            .active_count(thresholds.rule_confidence(Mode::Aggressive)),
    ));
    lines.push(format!("bigrams:      {}", artifact.bigrams.len()));
    lines.push(format!("sentences:    {}", artifact.sentences.len()));
    for mode in Mode::ALL {
        let accuracy = match mode {
            Mode::Conservative => evaluation.conservative_accuracy,
            Mode::Aggressive => evaluation.aggressive_accuracy,
        };
        lines.push(format!(
            "{:<13} max distance {}, accuracy {}",
            format!("{}:", mode),
            thresholds.max_distance(mode),
            percent(accuracy)
        ));
    }
    lines.join("\n")
}
