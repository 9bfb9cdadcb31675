//! Compact text encoding of a [`TypingLog`]
//!
//! ```text
//! TLv1,en,5,H10i10 -20y0o0|0,2,10,0+H,10,1+i,
//! ```
//!
//! The header holds the version, language code, and text length. Each text
//! char follows, trailed by its timing delta from the previous char (which
//! may be negative when a later char was typed earlier or not at all). A
//! char that could be mistaken for part of a delta is escaped with `\x08`.
//!
//! After the `|` come the edit entries. Consecutive entries with the same
//! start position share one `<start>,<count>,` group header, then each entry
//! is `<delta>,<ops>,` where ops are `<pos><marker><char>` run together.

use super::{EditEntry, TypingLog};
use crate::edit::EditOp;
use crate::error::{LogSection, Result, TypingError};
use crate::text::Language;
use log::debug;
use std::fmt::Write;

/// Leading marker of every encoded log
pub const PREFIX: &str = "TLv";
/// The only version understood by this codec
pub const VERSION: u32 = 1;
/// Separates the char timings from the edit log
const SECTION_SEPARATOR: char = '|';
const FIELD_SEPARATOR: char = ',';
/// Escapes text chars that would otherwise be read as a timing delta
const ESCAPE: char = '\u{8}';

fn needs_escape(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == ESCAPE
}

/// Returns `true` if `s` looks like an encoded typing log.
pub fn is_typing_log(s: &str) -> bool {
    s.starts_with(PREFIX)
}

/// Encodes `log` in the compact wire format.
pub fn format(log: &TypingLog) -> String {
    let mut out = String::with_capacity(log.text().len() * 4 + log.edit_log().len() * 8);
    // writing into a String cannot fail
    let _ = write!(
        out,
        "{}{}{}{}{}{}{}",
        PREFIX,
        VERSION,
        FIELD_SEPARATOR,
        log.language().code(),
        FIELD_SEPARATOR,
        log.text_len(),
        FIELD_SEPARATOR
    );

    let mut prev = 0i64;
    for (c, &t) in log.text().chars().zip(log.char_timings()) {
        if needs_escape(c) {
            out.push(ESCAPE);
        }
        out.push(c);
        let t = t as i64;
        let _ = write!(out, "{}", t - prev);
        prev = t;
    }
    out.push(SECTION_SEPARATOR);

    let mut prev_time = 0u64;
    for group in log.edit_log().chunk_by(|a, b| a.start_pos == b.start_pos) {
        let _ = write!(
            out,
            "{}{}{}{}",
            group[0].start_pos,
            FIELD_SEPARATOR,
            group.len(),
            FIELD_SEPARATOR
        );
        for entry in group {
            let _ = write!(out, "{}{}", entry.elapsed_ms - prev_time, FIELD_SEPARATOR);
            prev_time = entry.elapsed_ms;
            for op in &entry.ops {
                let _ = write!(out, "{}", op);
            }
            out.push(FIELD_SEPARATOR);
        }
    }

    debug!(
        "formatted typing log: {} chars, {} entries, {} bytes",
        log.text_len(),
        log.edit_log().len(),
        out.len()
    );
    out
}

/// Decodes a wire string produced by [`format`].
///
/// Any malformed or truncated section is a [`TypingError::Format`]; nothing
/// partial is ever returned.
pub fn parse(s: &str) -> Result<TypingLog> {
    let log = Parser::new(s).parse()?;
    debug!(
        "parsed typing log: {} chars, {} entries",
        log.text_len(),
        log.edit_log().len()
    );
    Ok(log)
}

struct Parser {
    chars: Vec<char>,
    cursor: usize,
}

impl Parser {
    fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
            cursor: 0,
        }
    }

    fn parse(mut self) -> Result<TypingLog> {
        let section = LogSection::Header;
        for expected in PREFIX.chars() {
            if self.next() != Some(expected) {
                return Err(self.error(section, format!("expected '{}' prefix", PREFIX)));
            }
        }
        let version = self.read_number(section)?;
        if version != u64::from(VERSION) {
            return Err(self.error(section, format!("unsupported version {}", version)));
        }
        let code = self.read_field(section)?;
        let language = Language::from_code(&code)
            .ok_or_else(|| self.error(section, format!("unknown language code {:?}", code)))?;
        let len = self.read_number(section)? as usize;

        let text_start = self.cursor;
        let (text, timings) = self.read_char_timings(len)?;
        if self.next() != Some(SECTION_SEPARATOR) {
            return Err(self.error(
                LogSection::CharTimings,
                format!("expected '{}' after {} chars", SECTION_SEPARATOR, len),
            ));
        }
        let entries = self.read_edit_log()?;

        TypingLog::new(text, language, timings, entries)
            .map_err(|e| TypingError::format(text_start, LogSection::CharTimings, e.to_string()))
    }

    fn next(&mut self) -> Option<char> {
        let c = self.chars.get(self.cursor).copied();
        if c.is_some() {
            self.cursor += 1;
        }
        c
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    fn at_end(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    fn error(&self, section: LogSection, message: impl Into<String>) -> TypingError {
        TypingError::format(self.cursor, section, message)
    }

    /// Reads up to the next field separator and consumes it.
    fn read_field(&mut self, section: LogSection) -> Result<String> {
        let start = self.cursor;
        let len = self.chars[start..]
            .iter()
            .position(|&c| c == FIELD_SEPARATOR)
            .ok_or_else(|| self.error(section, "unterminated field"))?;
        self.cursor = start + len + 1;
        Ok(self.chars[start..start + len].iter().collect())
    }

    fn read_number(&mut self, section: LogSection) -> Result<u64> {
        let start = self.cursor;
        let field = self.read_field(section)?;
        if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypingError::format(
                start,
                section,
                format!("expected a number, found {:?}", field),
            ));
        }
        field
            .parse()
            .map_err(|_| TypingError::format(start, section, format!("number too large: {}", field)))
    }

    /// Reads a signed delta made of an optional '-' and digits.
    fn read_delta(&mut self, section: LogSection) -> Result<i64> {
        let start = self.cursor;
        if self.peek() == Some('-') {
            self.cursor += 1;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor += 1;
        }
        let digits: String = self.chars[start..self.cursor].iter().collect();
        digits.parse().map_err(|_| {
            TypingError::format(start, section, format!("expected a timing delta, found {:?}", digits))
        })
    }

    fn read_char_timings(&mut self, len: usize) -> Result<(String, Vec<u64>)> {
        let section = LogSection::CharTimings;
        let capacity = len.min(self.chars.len());
        let mut text = String::with_capacity(capacity);
        let mut timings = Vec::with_capacity(capacity);
        let mut time = 0i64;
        for i in 0..len {
            let mut c = self
                .next()
                .ok_or_else(|| self.error(section, format!("text ends after {} of {} chars", i, len)))?;
            if c == ESCAPE {
                c = self
                    .next()
                    .ok_or_else(|| self.error(section, "escape at end of input"))?;
            }
            text.push(c);
            let start = self.cursor;
            time = time
                .checked_add(self.read_delta(section)?)
                .ok_or_else(|| TypingError::format(start, section, "timing overflow"))?;
            if time < 0 {
                return Err(TypingError::format(
                    start,
                    section,
                    format!("timing of char {} is negative", i),
                ));
            }
            timings.push(time as u64);
        }
        Ok((text, timings))
    }

    fn read_edit_log(&mut self) -> Result<Vec<EditEntry>> {
        let section = LogSection::EditLog;
        let mut entries = Vec::new();
        let mut time = 0u64;
        while !self.at_end() {
            let start_pos = self.read_number(section)? as usize;
            let count_at = self.cursor;
            let count = self.read_number(section)?;
            if count == 0 {
                return Err(TypingError::format(count_at, section, "empty entry group"));
            }
            for _ in 0..count {
                let delta_at = self.cursor;
                time = time
                    .checked_add(self.read_number(section)?)
                    .ok_or_else(|| TypingError::format(delta_at, section, "timing overflow"))?;
                let ops = self.read_ops()?;
                entries.push(EditEntry::new(start_pos, ops, time));
            }
        }
        Ok(entries)
    }

    /// Reads ops up to and including the entry's closing separator.
    fn read_ops(&mut self) -> Result<Vec<EditOp>> {
        let section = LogSection::EditLog;
        let mut ops = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.error(section, "unterminated edit entry")),
                Some(FIELD_SEPARATOR) => {
                    self.cursor += 1;
                    return Ok(ops);
                }
                Some(_) => ops.push(self.read_op()?),
            }
        }
    }

    fn read_op(&mut self) -> Result<EditOp> {
        let section = LogSection::EditLog;
        let start = self.cursor;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor += 1;
        }
        let digits: String = self.chars[start..self.cursor].iter().collect();
        let pos = digits
            .parse()
            .map_err(|_| TypingError::format(start, section, format!("expected an op position, found {:?}", digits)))?;
        let marker = self.next().ok_or_else(|| self.error(section, "truncated op"))?;
        let ch = self.next().ok_or_else(|| self.error(section, "truncated op"))?;
        EditOp::from_marker(marker, pos, ch).ok_or_else(|| {
            TypingError::format(self.cursor - 2, section, format!("unknown op marker {:?}", marker))
        })
    }
}
