//! Word spans of a target text
//!
//! Each word owns the span from its first char up to and including the
//! delimiter that follows it. The last word's span ends at the end of the
//! text.

use super::Language;
use crate::error::{Result, TypingError};

/// Char positions of every word in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLayout {
    words: Vec<String>,
    starts: Vec<usize>,
    span_ends: Vec<usize>,
    text_len: usize,
}

impl WordLayout {
    /// Tokenizes `text` with `language`.
    ///
    /// Fails with [`TypingError::State`] if the text is empty or contains an
    /// empty word (e.g. a doubled delimiter).
    pub fn new(text: &str, language: &Language) -> Result<Self> {
        if text.is_empty() {
            return Err(TypingError::state("text must not be empty"));
        }
        let words = language.tokenize(text);
        let text_len = text.chars().count();
        let delim_len = if language.is_logographic() {
            0
        } else {
            language.delimiter().chars().count()
        };

        let mut starts = Vec::with_capacity(words.len());
        let mut span_ends = Vec::with_capacity(words.len());
        let mut pos = 0;
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(TypingError::state(format!(
                    "word {} of the text is empty",
                    i
                )));
            }
            starts.push(pos);
            pos = (pos + word.chars().count() + delim_len).min(text_len);
            span_ends.push(pos);
        }

        Ok(Self {
            words,
            starts,
            span_ends,
            text_len,
        })
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Position of the first char of each word.
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Exclusive end of each word's span, delimiter included.
    pub fn span_ends(&self) -> &[usize] {
        &self.span_ends
    }

    /// Index of the word whose span contains `pos`.
    pub fn word_index_at(&self, pos: usize) -> Option<usize> {
        if pos >= self.text_len {
            return None;
        }
        Some(self.span_ends.partition_point(|&end| end <= pos))
    }

    /// Number of words whose whole span lies before `char_cursor`.
    pub fn words_completed(&self, char_cursor: usize) -> usize {
        self.span_ends.partition_point(|&end| end <= char_cursor)
    }

    /// Largest span end that is `<= limit`, if any.
    pub fn last_boundary_within(&self, limit: usize) -> Option<usize> {
        match self.words_completed(limit) {
            0 => None,
            n => Some(self.span_ends[n - 1]),
        }
    }
}
