//! Accuracy and speed of a finished typing log

use super::replay::LogReplay;
use super::segments::{split_segments, TextSegment};
use super::speed;
use crate::edit::{edit_distance_chars, EditOp};
use crate::error::Result;
use crate::log::TypingLog;
use crate::utils::to_chars;
use std::collections::BTreeSet;

/// Results derived from replaying a [`TypingLog`] to its end.
#[derive(Debug, Clone)]
pub struct LogAnalyzer {
    log: TypingLog,
    total_ops: usize,
    error_ops: usize,
    error_words: BTreeSet<usize>,
    final_buffer: String,
}

impl LogAnalyzer {
    /// Replays `log`, tracking which insertion typed each buffered char.
    ///
    /// An op is an error if it is a deletion or substitution, or an insertion
    /// whose char was later removed or ended up at a position where it does
    /// not match the text. Ops that did not fit the buffer count as errors.
    pub fn new(log: TypingLog) -> Self {
        let text = to_chars(log.text());
        let op_count = log.op_count();
        // position of each applied insertion, by op index
        let mut inserted_at: Vec<Option<usize>> = vec![None; op_count];
        let mut removed = vec![false; op_count];
        let mut error_positions = Vec::new();
        let mut error_ops = 0;

        let mut replay = LogReplay::new(&log);
        while let Some(ops) = replay.apply_next() {
            for applied in ops {
                if !applied.applied {
                    error_ops += 1;
                    continue;
                }
                match applied.op {
                    EditOp::Insertion { .. } => inserted_at[applied.index] = Some(applied.abs_pos),
                    EditOp::Deletion { .. } | EditOp::Substitution { .. } => {
                        error_ops += 1;
                        error_positions.push(applied.abs_pos);
                        if let Some(origin) = applied.replaced_origin {
                            removed[origin] = true;
                        }
                    }
                }
            }
        }

        let mut survived_correct = vec![false; op_count];
        for (pos, (ch, origin)) in replay.buffer_origins().enumerate() {
            if let Some(origin) = origin {
                survived_correct[origin] = text.get(pos) == Some(&ch);
            }
        }
        for (index, pos) in inserted_at.iter().enumerate() {
            let Some(pos) = *pos else { continue };
            if !survived_correct[index] {
                error_ops += 1;
            }
            if removed[index] {
                error_positions.push(pos);
            }
        }

        let layout = log.layout();
        let error_words = error_positions
            .into_iter()
            .filter_map(|pos| layout.word_index_at(pos))
            .collect();
        let total_ops = replay.op_count();
        let final_buffer = replay.buffer();

        Self {
            log,
            total_ops,
            error_ops,
            error_words,
            final_buffer,
        }
    }

    pub fn log(&self) -> &TypingLog {
        &self.log
    }

    pub fn into_log(self) -> TypingLog {
        self.log
    }

    /// Fraction of edit ops that were not errors, 1.0 for an empty log.
    pub fn calc_accuracy(&self) -> f64 {
        if self.total_ops == 0 {
            return 1.0;
        }
        (1.0 - self.error_ops as f64 / self.total_ops as f64).clamp(0.0, 1.0)
    }

    pub fn total_op_count(&self) -> usize {
        self.total_ops
    }

    pub fn error_op_count(&self) -> usize {
        self.error_ops
    }

    /// The text as it stood after the last edit.
    pub fn final_buffer(&self) -> &str {
        &self.final_buffer
    }

    /// Edits still needed to turn the final buffer into the text it covers.
    ///
    /// Only as many text chars as the buffer holds are compared, so an
    /// unfinished log is not charged for the part never typed.
    pub fn uncorrected_error_count(&self) -> usize {
        let typed = to_chars(&self.final_buffer);
        let text = to_chars(self.log.text());
        let target = &text[..typed.len().min(text.len())];
        edit_distance_chars(&typed, target, true)
    }

    /// Indices of words that needed a correction, in text order.
    pub fn word_indices_with_errors(&self) -> impl Iterator<Item = usize> + '_ {
        self.error_words.iter().copied()
    }

    /// Words that needed a correction, in text order, without duplicates.
    pub fn words_with_errors(&self) -> Vec<String> {
        let layout = self.log.layout();
        self.error_words
            .iter()
            .filter_map(|&i| layout.word(i))
            .map(String::from)
            .collect()
    }

    /// Overall WPM over the leading run of typed chars.
    pub fn calc_wpm(&self) -> f64 {
        let typed = self.log.num_chars_typed();
        if typed == 0 {
            return 0.0;
        }
        let ms = self.log.char_timings()[typed - 1];
        speed::calc_wpm(typed, ms as f64, self.log.language())
    }

    /// Splits the text into `min(n, word count)` word-aligned segments and
    /// computes the speed each one was typed at.
    ///
    /// A segment whose last char was never typed reports 0 WPM.
    pub fn segment_wpms(&self, n: usize) -> Result<Vec<TextSegment>> {
        let timings = self.log.char_timings();
        let language = self.log.language();
        let ranges = split_segments(self.log.layout(), n)?;
        Ok(ranges
            .into_iter()
            .map(|range| {
                let end_time = timings[range.end - 1];
                let start_time = match range.start {
                    0 => 0,
                    a => timings[a - 1],
                };
                let wpm = if end_time == 0 {
                    0.0
                } else {
                    speed::calc_wpm(
                        range.len(),
                        end_time.saturating_sub(start_time) as f64,
                        language,
                    )
                };
                TextSegment {
                    start_pos: range.start,
                    end_pos: range.end,
                    wpm,
                }
            })
            .collect())
    }
}
