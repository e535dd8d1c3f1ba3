//! Tab-separated table readers for lexicon, bigram and sentence files.
//!
//! Blank lines and lines starting with `#` are skipped. Any other malformed
//! row is an error carrying its 1-based line number.

use crate::defaults::DEFAULT_ENTRY_WEIGHT;
use crate::error::{Result, ShuddhoError};
use crate::lexicon::{BigramTable, Lexicon, LexiconEntry, SentenceMemory};
use crate::text::script::normalize_whitespace;
use crate::text::{is_single_word, same_layout};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read `path` and hand each data row's fields to `row` with its line number.
fn for_each_row<F>(path: &Path, mut row: F) -> Result<()>
where
    F: FnMut(usize, Vec<&str>) -> Result<()>,
{
    let file = File::open(path).map_err(|e| ShuddhoError::artifact(path, e.to_string()))?;
    let reader = BufReader::new(file);

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| ShuddhoError::artifact_line(path, line_no, e.to_string()))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        row(line_no, fields)?;
    }
    Ok(())
}

fn require<'a>(
    path: &Path,
    line: usize,
    fields: &[&'a str],
    idx: usize,
    what: &str,
) -> Result<&'a str> {
    match fields.get(idx) {
        Some(f) if !f.is_empty() => Ok(*f),
        _ => Err(ShuddhoError::artifact_line(path, line, format!("missing {}", what))),
    }
}

/// Like [`require`], but the field must also be a single word token.
fn require_word<'a>(
    path: &Path,
    line: usize,
    fields: &[&'a str],
    idx: usize,
    what: &str,
) -> Result<&'a str> {
    let field = require(path, line, fields, idx, what)?;
    if !is_single_word(field) {
        return Err(ShuddhoError::artifact_line(
            path,
            line,
            format!("{} '{}' is not a single Bengali word", what, field),
        ));
    }
    Ok(field)
}

fn too_many(path: &Path, line: usize, fields: &[&str], max: usize) -> Result<()> {
    if fields.len() > max {
        return Err(ShuddhoError::artifact_line(
            path,
            line,
            format!("expected at most {} columns, found {}", max, fields.len()),
        ));
    }
    Ok(())
}

/// Load `surface<TAB>canonical[<TAB>weight]` rows into a [`Lexicon`].
pub fn read_lexicon(path: &Path) -> Result<Lexicon> {
    let mut rows = Vec::new();
    let mut seen = std::collections::HashMap::new();

    for_each_row(path, |line, fields| {
        too_many(path, line, &fields, 3)?;
        let surface = require_word(path, line, &fields, 0, "surface form")?;
        let canonical = require_word(path, line, &fields, 1, "canonical form")?;
        let weight = match fields.get(2).filter(|f| !f.is_empty()) {
            None => DEFAULT_ENTRY_WEIGHT,
            Some(raw) => {
                let w: f64 = raw.parse().map_err(|_| {
                    ShuddhoError::artifact_line(path, line, format!("invalid weight '{}'", raw))
                })?;
                if !w.is_finite() || w < 0.0 {
                    return Err(ShuddhoError::artifact_line(
                        path,
                        line,
                        format!("weight must be a non-negative number, got {}", raw),
                    ));
                }
                w
            }
        };
        if let Some(first) = seen.insert(surface.to_string(), line) {
            return Err(ShuddhoError::artifact_line(
                path,
                line,
                format!("duplicate surface form '{}' (first on line {})", surface, first),
            ));
        }
        rows.push(LexiconEntry::new(surface, canonical, weight));
        Ok(())
    })?;

    Lexicon::from_entries(rows).map_err(|e| ShuddhoError::artifact(path, e.to_string()))
}

/// Load `previous<TAB>word<TAB>correction` rows.
pub fn read_bigrams(path: &Path) -> Result<BigramTable> {
    let mut table = BigramTable::new();
    for_each_row(path, |line, fields| {
        too_many(path, line, &fields, 3)?;
        let previous = require_word(path, line, &fields, 0, "previous word")?;
        let word = require_word(path, line, &fields, 1, "word")?;
        let correction = require_word(path, line, &fields, 2, "correction")?;
        if !table.insert(previous, word, correction) {
            return Err(ShuddhoError::artifact_line(
                path,
                line,
                format!("duplicate bigram '{} {}'", previous, word),
            ));
        }
        Ok(())
    })?;
    Ok(table)
}

/// Load `incorrect<TAB>correct` sentence rows.
pub fn read_sentences(path: &Path) -> Result<SentenceMemory> {
    let mut memory = SentenceMemory::new();
    for_each_row(path, |line, fields| {
        too_many(path, line, &fields, 2)?;
        let incorrect = require(path, line, &fields, 0, "incorrect sentence")?;
        let correct = require(path, line, &fields, 1, "correct sentence")?;
        let correct = normalize_whitespace(correct);
        if !same_layout(&normalize_whitespace(incorrect), &correct) {
            return Err(ShuddhoError::artifact_line(
                path,
                line,
                "correct sentence must keep the words and separators of the incorrect one"
                    .to_string(),
            ));
        }
        if !memory.insert(incorrect, correct) {
            return Err(ShuddhoError::artifact_line(
                path,
                line,
                "duplicate sentence".to_string(),
            ));
        }
        Ok(())
    })?;
    Ok(memory)
}
