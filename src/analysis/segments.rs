//! Splitting a text into word-aligned segments

use crate::error::{Result, TypingError};
use crate::text::WordLayout;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous part of the text and the speed it was typed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    pub start_pos: usize,
    /// Exclusive
    pub end_pos: usize,
    pub wpm: f64,
}

impl TextSegment {
    pub fn len(&self) -> usize {
        self.end_pos - self.start_pos
    }

    pub fn is_empty(&self) -> bool {
        self.start_pos == self.end_pos
    }

    /// The part of `text` this segment covers.
    pub fn text_of(&self, text: &str) -> String {
        text.chars()
            .skip(self.start_pos)
            .take(self.len())
            .collect()
    }
}

/// Splits the text into `min(n, word count)` char ranges.
///
/// Every boundary falls on a word start, picked as close as possible to an
/// even split of the text length, and every range holds at least one word.
pub fn split_segments(layout: &WordLayout, n: usize) -> Result<Vec<Range<usize>>> {
    if n == 0 {
        return Err(TypingError::Range(
            "segment count must be at least 1".to_string(),
        ));
    }
    let starts = layout.starts();
    let words = starts.len();
    let len = layout.text_len();
    let m = n.min(words);

    let mut ranges = Vec::with_capacity(m);
    let mut prev_word = 0;
    for k in 1..m {
        let target = (k * len) as f64 / m as f64;
        // leave at least one word for each remaining segment
        let lo = prev_word + 1;
        let hi = words - (m - k);
        let word = closest_start(&starts[lo..=hi], target) + lo;
        ranges.push(starts[prev_word]..starts[word]);
        prev_word = word;
    }
    ranges.push(starts[prev_word]..len);
    Ok(ranges)
}

/// Index of the value in sorted `starts` closest to `target`, earlier on ties.
fn closest_start(starts: &[usize], target: f64) -> usize {
    let after = starts.partition_point(|&s| (s as f64) < target);
    if after == 0 {
        return 0;
    }
    if after == starts.len() {
        return after - 1;
    }
    let below = target - starts[after - 1] as f64;
    let above = starts[after] as f64 - target;
    if below <= above {
        after - 1
    } else {
        after
    }
}
