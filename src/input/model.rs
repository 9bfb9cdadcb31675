//! Input model - matches live input snapshots against the target text
//!
//! Each call to [`InputModel::update`] diffs the new snapshot against the
//! previous one, appends the edit to the log, and works out how much of the
//! input is correct and can be accepted.

use super::Clock;
use crate::edit::edit_sequence_chars;
use crate::error::{Result, TypingError};
use crate::log::{EditEntry, TypingLog};
use crate::text::{Language, WordLayout};
use crate::utils::{matching_prefix_len, to_chars};
use log::{debug, warn};

/// Where the model is in its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    NotStarted,
    Timing,
    Finished,
}

/// What changed as a result of one input snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    /// Chars the caller should remove from the front of its input field
    pub accepted_input_prefix_length: usize,
    /// Input left after removing the accepted prefix
    pub new_input_value: String,
    pub new_char_cursor: usize,
    /// Leading chars of the remaining input that match the text so far
    pub correct_input_prefix_length: usize,
    pub new_word_cursor: usize,
}

/// Tracks a typing session over one target text.
#[derive(Debug)]
pub struct InputModel {
    text: String,
    chars: Vec<char>,
    language: Language,
    layout: WordLayout,
    accept_prefixes: bool,
    char_cursor: usize,
    word_cursor: usize,
    num_chars_accepted: usize,
    char_timings: Vec<u64>,
    edit_log: Vec<EditEntry>,
    /// Our copy of the unaccepted input
    buffer: Vec<char>,
    last_elapsed_ms: u64,
    clock: Option<Box<dyn Clock>>,
    last_update: Option<UpdateResult>,
    lifecycle: Lifecycle,
}

impl InputModel {
    /// Creates a model for `text`.
    ///
    /// With `accept_prefixes` set, every correct leading char is accepted
    /// as soon as it is typed. Otherwise a word is accepted only together
    /// with its trailing delimiter. Logographic languages always accept per
    /// char.
    pub fn new(text: impl Into<String>, language: Language, accept_prefixes: bool) -> Result<Self> {
        let text = text.into();
        let layout = WordLayout::new(&text, &language)?;
        let chars = to_chars(&text);
        Ok(Self {
            char_timings: vec![0; chars.len()],
            text,
            chars,
            language,
            layout,
            accept_prefixes,
            char_cursor: 0,
            word_cursor: 0,
            num_chars_accepted: 0,
            edit_log: Vec::new(),
            buffer: Vec::new(),
            last_elapsed_ms: 0,
            clock: None,
            last_update: None,
            lifecycle: Lifecycle::NotStarted,
        })
    }

    /// Starts the session; all edit timestamps are read from `clock`.
    pub fn start_timing(&mut self, clock: Box<dyn Clock>) -> Result<()> {
        if self.lifecycle != Lifecycle::NotStarted {
            return Err(TypingError::state(format!(
                "cannot start timing in state {:?}",
                self.lifecycle
            )));
        }
        self.clock = Some(clock);
        self.lifecycle = Lifecycle::Timing;
        debug!("started timing ({} chars, {} words)", self.chars.len(), self.layout.word_count());
        Ok(())
    }

    /// Processes a snapshot of the caller's input field.
    ///
    /// Returns `Ok(None)` once the text is finished. Nothing changes when an
    /// error is returned.
    pub fn update<'a>(&mut self, snapshot: impl Into<Option<&'a str>>) -> Result<Option<UpdateResult>> {
        let snapshot = snapshot
            .into()
            .ok_or_else(|| TypingError::Input("input snapshot is missing".to_string()))?;
        let clock = match (self.lifecycle, &self.clock) {
            (Lifecycle::Finished, _) => {
                debug!("ignoring input after the text was finished");
                return Ok(None);
            }
            (Lifecycle::Timing, Some(clock)) => clock,
            _ => return Err(TypingError::state("update called before start_timing")),
        };

        let mut elapsed = clock.elapsed_ms();
        if elapsed < self.last_elapsed_ms {
            warn!(
                "clock went backwards from {} to {} ms, clamping",
                self.last_elapsed_ms, elapsed
            );
            elapsed = self.last_elapsed_ms;
        }
        // a zero timing means "never typed"
        let elapsed = elapsed.max(1);

        let input = to_chars(snapshot);
        let ops = edit_sequence_chars(&self.buffer, &input, true);
        let correct = matching_prefix_len(&self.chars, self.char_cursor, &input);
        let accepted = self.acceptable_len(correct);

        self.last_elapsed_ms = elapsed;
        self.edit_log
            .push(EditEntry::new(self.char_cursor, ops.into_ops(), elapsed));
        for t in &mut self.char_timings[self.char_cursor..self.char_cursor + correct] {
            if *t == 0 {
                *t = elapsed;
            }
        }
        self.buffer = input[accepted..].to_vec();
        self.char_cursor += accepted;
        self.num_chars_accepted += accepted;
        self.word_cursor = self.layout.words_completed(self.char_cursor);

        let result = UpdateResult {
            accepted_input_prefix_length: accepted,
            new_input_value: self.buffer.iter().collect(),
            new_char_cursor: self.char_cursor,
            correct_input_prefix_length: correct - accepted,
            new_word_cursor: self.word_cursor,
        };
        debug!(
            "update at {} ms: {} correct, {} accepted, cursor {}/{}",
            elapsed,
            correct,
            accepted,
            self.char_cursor,
            self.chars.len()
        );
        if self.word_cursor == self.layout.word_count() {
            self.lifecycle = Lifecycle::Finished;
            debug!("text finished after {} ms", elapsed);
        }
        self.last_update = Some(result.clone());
        Ok(Some(result))
    }

    /// How many of the `correct` leading input chars can be accepted.
    fn acceptable_len(&self, correct: usize) -> usize {
        if self.accept_prefixes || self.language.is_logographic() {
            return correct;
        }
        match self.layout.last_boundary_within(self.char_cursor + correct) {
            Some(end) if end > self.char_cursor => end - self.char_cursor,
            _ => 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.lifecycle == Lifecycle::Finished
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn char_cursor(&self) -> usize {
        self.char_cursor
    }

    pub fn word_cursor(&self) -> usize {
        self.word_cursor
    }

    pub fn num_chars_accepted(&self) -> usize {
        self.num_chars_accepted
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn accepts_prefixes(&self) -> bool {
        self.accept_prefixes
    }

    pub fn last_update_result(&self) -> Option<&UpdateResult> {
        self.last_update.as_ref()
    }

    /// Snapshot of the log recorded so far.
    pub fn typing_log(&self) -> TypingLog {
        TypingLog::from_parts(
            self.text.clone(),
            self.language.clone(),
            self.layout.clone(),
            self.char_timings.clone(),
            self.edit_log.clone(),
        )
    }
}
