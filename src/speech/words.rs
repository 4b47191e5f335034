//! Word segmentation for narration and highlighting

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// A whitespace-delimited word within a text
///
/// `start..end` are character offsets (what boundary notifications report);
/// `byte_start..byte_end` slice the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
    pub byte_start: usize,
    pub byte_end: usize,
}

impl WordSpan {
    /// Whether the character offset falls inside this word
    pub fn contains(&self, char_index: usize) -> bool {
        self.start <= char_index && char_index < self.end
    }

    /// The word's text within `source`
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.byte_start..self.byte_end]
    }
}

/// Split text into words with their character and byte offsets
pub fn tokenize(text: &str) -> Vec<WordSpan> {
    let mut words = Vec::new();
    let mut chars_seen = 0;
    let mut bytes_seen = 0;

    for m in WORD_RE.find_iter(text) {
        chars_seen += text[bytes_seen..m.start()].chars().count();
        let start = chars_seen;
        let len = m.as_str().chars().count();
        chars_seen += len;
        bytes_seen = m.end();

        words.push(WordSpan { start, end: start + len, byte_start: m.start(), byte_end: m.end() });
    }

    words
}

/// The word a boundary at `char_index` refers to
///
/// Returns the word containing the offset, or when the offset sits on
/// whitespace, the closest word that starts before it.
pub fn word_at(words: &[WordSpan], char_index: usize) -> Option<WordSpan> {
    let after = words.partition_point(|w| w.start <= char_index);
    after.checked_sub(1).map(|i| words[i])
}
