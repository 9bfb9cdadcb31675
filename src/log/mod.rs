//! The typing log: target text, per-char timings, and the edit history
//!
//! The input model is the only writer of a log; the codec and analyzer only
//! read finished ones.

pub mod codec;

use crate::edit::EditOp;
use crate::error::{Result, TypingError};
use crate::text::{Language, WordLayout};
use std::fmt;

/// Ops computed by one input-model update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEntry {
    /// Char cursor at the time of the update; op positions are relative to it
    pub start_pos: usize,
    pub ops: Vec<EditOp>,
    /// Milliseconds since timing started
    pub elapsed_ms: u64,
}

impl EditEntry {
    pub fn new(start_pos: usize, ops: Vec<EditOp>, elapsed_ms: u64) -> Self {
        Self {
            start_pos,
            ops,
            elapsed_ms,
        }
    }
}

/// Everything recorded for one typing session.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingLog {
    text: String,
    language: Language,
    layout: WordLayout,
    char_timings: Vec<u64>,
    edit_log: Vec<EditEntry>,
}

impl TypingLog {
    /// Validates and assembles a log.
    ///
    /// The text must be non-empty with no empty words, there must be exactly
    /// one timing per char of text, and entry times must never decrease.
    pub fn new(
        text: impl Into<String>,
        language: Language,
        char_timings: Vec<u64>,
        edit_log: Vec<EditEntry>,
    ) -> Result<Self> {
        let text = text.into();
        let layout = WordLayout::new(&text, &language)?;
        if char_timings.len() != layout.text_len() {
            return Err(TypingError::state(format!(
                "expected {} char timings, got {}",
                layout.text_len(),
                char_timings.len()
            )));
        }
        if let Some(i) = edit_log
            .windows(2)
            .position(|w| w[1].elapsed_ms < w[0].elapsed_ms)
        {
            return Err(TypingError::state(format!(
                "edit entry {} is earlier than the one before it",
                i + 1
            )));
        }
        Ok(Self::from_parts(text, language, layout, char_timings, edit_log))
    }

    /// Assembles a log from parts the caller has already validated.
    pub(crate) fn from_parts(
        text: String,
        language: Language,
        layout: WordLayout,
        char_timings: Vec<u64>,
        edit_log: Vec<EditEntry>,
    ) -> Self {
        Self {
            text,
            language,
            layout,
            char_timings,
            edit_log,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn layout(&self) -> &WordLayout {
        &self.layout
    }

    pub fn text_len(&self) -> usize {
        self.layout.text_len()
    }

    /// Elapsed ms at which each char was first typed correctly, 0 if never.
    pub fn char_timings(&self) -> &[u64] {
        &self.char_timings
    }

    pub fn edit_log(&self) -> &[EditEntry] {
        &self.edit_log
    }

    /// Length of the leading run of chars that were typed.
    pub fn num_chars_typed(&self) -> usize {
        self.char_timings.iter().take_while(|&&t| t > 0).count()
    }

    /// Timestamp of the last edit entry.
    pub fn total_elapsed_ms(&self) -> u64 {
        self.edit_log.last().map_or(0, |e| e.elapsed_ms)
    }

    /// Total number of ops across all entries.
    pub fn op_count(&self) -> usize {
        self.edit_log.iter().map(|e| e.ops.len()).sum()
    }
}

impl fmt::Display for TypingLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_timing_count() {
        let err = TypingLog::new("Hi yo", Language::english(), vec![0; 4], vec![]).unwrap_err();
        assert!(matches!(err, TypingError::State(_)));
    }

    #[test]
    fn new_rejects_empty_text_and_words() {
        assert!(TypingLog::new("", Language::english(), vec![], vec![]).is_err());
        assert!(TypingLog::new("a  b", Language::english(), vec![0; 4], vec![]).is_err());
    }

    #[test]
    fn typed_prefix_and_elapsed() {
        let log = TypingLog::new(
            "Hi yo",
            Language::english(),
            vec![10, 20, 0, 0, 0],
            vec![
                EditEntry::new(0, vec![EditOp::insertion(0, 'H')], 10),
                EditEntry::new(0, vec![EditOp::insertion(1, 'i')], 20),
            ],
        )
        .unwrap();
        assert_eq!(log.num_chars_typed(), 2);
        assert_eq!(log.total_elapsed_ms(), 20);
        assert_eq!(log.op_count(), 2);
        assert_eq!(log.text_len(), 5);
    }

    #[test]
    fn new_rejects_entries_going_back_in_time() {
        let entries = vec![EditEntry::new(0, vec![], 20), EditEntry::new(0, vec![], 10)];
        let err = TypingLog::new("a", Language::english(), vec![0], entries).unwrap_err();
        assert!(matches!(err, TypingError::State(_)));
    }

    #[test]
    fn empty_log_has_zero_elapsed() {
        let log = TypingLog::new("a", Language::english(), vec![0], vec![]).unwrap();
        assert_eq!(log.total_elapsed_ms(), 0);
        assert_eq!(log.num_chars_typed(), 0);
    }
}
