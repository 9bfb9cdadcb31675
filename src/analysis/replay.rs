//! Step-by-step reconstruction of what was typed
//!
//! Ops in an entry are relative to the entry's start position, which is the
//! number of chars accepted when it was recorded. Replaying them at
//! `start_pos + pos` over a buffer that keeps the accepted chars yields the
//! full typed text.

use crate::edit::EditOp;
use crate::log::TypingLog;
use log::warn;

/// One op as it was replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedOp {
    /// Index of the op across the whole log
    pub index: usize,
    pub op: EditOp,
    /// Position in the replay buffer
    pub abs_pos: usize,
    /// Index of the insertion that put the removed or overwritten char
    /// there, if it came from this log
    pub replaced_origin: Option<usize>,
    /// `false` if the op did not fit the buffer and was skipped
    pub applied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    origin: Option<usize>,
}

#[derive(Debug, Clone, Default)]
struct State {
    time: u64,
    edit_cursor: usize,
    char_cursor: usize,
    op_count: usize,
    skipped_ops: usize,
    buffer: Vec<Cell>,
}

/// Replays a [`TypingLog`] one edit entry at a time.
#[derive(Debug, Clone)]
pub struct LogReplay<'a> {
    log: &'a TypingLog,
    state: State,
}

impl<'a> LogReplay<'a> {
    pub fn new(log: &'a TypingLog) -> Self {
        Self {
            log,
            state: State::default(),
        }
    }

    pub fn log(&self) -> &'a TypingLog {
        self.log
    }

    pub fn reset(&mut self) {
        self.state = State::default();
    }

    pub fn is_finished(&self) -> bool {
        self.state.edit_cursor >= self.log.edit_log().len()
    }

    /// Applies every entry recorded at or before `ms`.
    ///
    /// Seeking backwards restarts the replay. Once the log is exhausted the
    /// time stays at the last entry's time.
    pub fn seek_to_time(&mut self, ms: u64) {
        if self.state.time > ms {
            self.reset();
        }
        while self.next_time().is_some_and(|t| t <= ms) {
            self.apply_next();
        }
        self.state.time = if self.is_finished() {
            self.log.total_elapsed_ms()
        } else {
            ms
        };
    }

    /// Applies entries until `edit_cursor` entries have been replayed.
    pub fn seek_to_edit(&mut self, edit_cursor: usize) {
        if self.state.edit_cursor > edit_cursor {
            self.reset();
        }
        while !self.is_finished() && self.state.edit_cursor < edit_cursor {
            self.apply_next();
        }
    }

    /// Applies entries until at least `char_cursor` chars are correct.
    pub fn seek_to_char(&mut self, char_cursor: usize) {
        if self.state.char_cursor > char_cursor {
            self.reset();
        }
        while !self.is_finished() && self.state.char_cursor < char_cursor {
            self.apply_next();
        }
    }

    pub fn seek_to_end(&mut self) {
        while !self.is_finished() {
            self.apply_next();
        }
    }

    fn next_time(&self) -> Option<u64> {
        self.log
            .edit_log()
            .get(self.state.edit_cursor)
            .map(|e| e.elapsed_ms)
    }

    /// Replays the next entry and reports what happened to each of its ops.
    ///
    /// Returns `None` when the log is exhausted.
    pub fn apply_next(&mut self) -> Option<Vec<AppliedOp>> {
        let entry = self.log.edit_log().get(self.state.edit_cursor)?;
        let mut applied = Vec::with_capacity(entry.ops.len());
        for &op in &entry.ops {
            let index = self.state.op_count;
            self.state.op_count += 1;
            let abs_pos = entry.start_pos + op.pos();
            let buffer = &mut self.state.buffer;
            let fits = match op {
                EditOp::Insertion { .. } => abs_pos <= buffer.len(),
                _ => abs_pos < buffer.len(),
            };
            if !fits {
                warn!(
                    "skipping op {} of entry {}: position {} is outside a buffer of length {}",
                    op,
                    self.state.edit_cursor,
                    abs_pos,
                    buffer.len()
                );
                self.state.skipped_ops += 1;
                applied.push(AppliedOp {
                    index,
                    op,
                    abs_pos,
                    replaced_origin: None,
                    applied: false,
                });
                continue;
            }
            let replaced_origin = match op {
                EditOp::Insertion { ch, .. } => {
                    buffer.insert(abs_pos, Cell { ch, origin: Some(index) });
                    None
                }
                EditOp::Deletion { .. } => buffer.remove(abs_pos).origin,
                EditOp::Substitution { ch, .. } => {
                    let old = std::mem::replace(&mut buffer[abs_pos], Cell { ch, origin: None });
                    old.origin
                }
            };
            applied.push(AppliedOp {
                index,
                op,
                abs_pos,
                replaced_origin,
                applied: true,
            });
        }
        self.state.time = entry.elapsed_ms;
        self.state.edit_cursor += 1;
        self.advance_char_cursor();
        Some(applied)
    }

    fn advance_char_cursor(&mut self) {
        let timings = self.log.char_timings();
        while let Some(&t) = timings.get(self.state.char_cursor) {
            if t > 0 && t <= self.state.time {
                self.state.char_cursor += 1;
            } else {
                break;
            }
        }
    }

    /// The text as typed up to the current point.
    pub fn buffer(&self) -> String {
        self.state.buffer.iter().map(|c| c.ch).collect()
    }

    /// For each buffered char, the index of the insertion that typed it.
    pub fn buffer_origins(&self) -> impl Iterator<Item = (char, Option<usize>)> + '_ {
        self.state.buffer.iter().map(|c| (c.ch, c.origin))
    }

    pub fn time(&self) -> u64 {
        self.state.time
    }

    /// Number of entries replayed
    pub fn edit_cursor(&self) -> usize {
        self.state.edit_cursor
    }

    /// Number of leading text chars typed correctly by the current time
    pub fn char_cursor(&self) -> usize {
        self.state.char_cursor
    }

    /// Ops replayed so far, skipped ones included
    pub fn op_count(&self) -> usize {
        self.state.op_count
    }

    pub fn skipped_ops(&self) -> usize {
        self.state.skipped_ops
    }
}
