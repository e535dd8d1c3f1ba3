//! Script-boundary tokenizer for Bengali text.
//!
//! Splits a sentence into alternating word and separator segments. Words are
//! maximal runs of Bengali letters, vowel signs and other combining marks;
//! everything else (whitespace, punctuation, dari, digits, Latin text) is a
//! separator kept byte-for-byte so the sentence can be rebuilt exactly.

const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';

/// Whether `c` belongs to a Bengali word.
///
/// Covers the Bengali block except its digits (U+09E6..U+09EF) and the
/// currency, fraction and abbreviation signs at the end of the block.
pub fn is_bengali_letter(c: char) -> bool {
    matches!(c, '\u{0980}'..='\u{09E5}' | '\u{09F0}'..='\u{09F1}')
}

/// Zero-width joiners that may appear inside a conjunct.
fn is_joiner(c: char) -> bool {
    c == ZWJ || c == ZWNJ
}

/// Kind of a segment produced by [`segments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Word,
    Separator,
}

/// A slice of the input sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    pub fn is_word(&self) -> bool {
        self.kind == SegmentKind::Word
    }
}

/// Split `sentence` into word and separator segments.
///
/// Concatenating the `text` of every segment yields `sentence` again.
/// Joiners continue a word but never start one.
pub fn segments(sentence: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut current: Option<SegmentKind> = None;

    for (idx, c) in sentence.char_indices() {
        let kind = if is_bengali_letter(c) || (is_joiner(c) && current == Some(SegmentKind::Word))
        {
            SegmentKind::Word
        } else {
            SegmentKind::Separator
        };

        match current {
            Some(prev) if prev == kind => {}
            Some(prev) => {
                out.push(Segment {
                    kind: prev,
                    text: &sentence[start..idx],
                });
                start = idx;
                current = Some(kind);
            }
            None => current = Some(kind),
        }
    }

    if let Some(kind) = current {
        out.push(Segment {
            kind,
            text: &sentence[start..],
        });
    }

    out
}

/// Word segments of `sentence`, in order.
pub fn words(sentence: &str) -> Vec<&str> {
    segments(sentence)
        .into_iter()
        .filter(Segment::is_word)
        .map(|s| s.text)
        .collect()
}

/// Whether `text` is exactly one word segment with no separators around it.
pub fn is_single_word(text: &str) -> bool {
    matches!(segments(text).as_slice(), [only] if only.is_word())
}

/// Whether `a` and `b` have the same words-and-separators layout: equal word
/// counts and identical separators, so only word content differs.
pub fn same_layout(a: &str, b: &str) -> bool {
    let (a, b) = (segments(a), segments(b));
    a.len() == b.len()
        && a.iter()
            .zip(&b)
            .all(|(x, y)| x.kind == y.kind && (x.is_word() || x.text == y.text))
}

/// Trim and collapse runs of whitespace to a single space.
pub fn normalize_whitespace(sentence: &str) -> String {
    sentence.split_whitespace().collect::<Vec<_>>().join(" ")
}
