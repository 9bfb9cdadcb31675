//! Single-character edit operations

use crate::error::{Result, TypingError};
use std::fmt;

/// Inserting, deleting, or substituting one character at a position.
///
/// Positions are relative to the buffer as it looks when the operation is
/// applied, i.e. after every preceding operation of the same script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// `ch` inserted before index `pos`
    Insertion { pos: usize, ch: char },
    /// `ch` removed from index `pos`
    Deletion { pos: usize, ch: char },
    /// The char at index `pos` replaced with `ch`
    Substitution { pos: usize, ch: char },
}

impl EditOp {
    pub fn insertion(pos: usize, ch: char) -> Self {
        EditOp::Insertion { pos, ch }
    }

    pub fn deletion(pos: usize, ch: char) -> Self {
        EditOp::Deletion { pos, ch }
    }

    pub fn substitution(pos: usize, ch: char) -> Self {
        EditOp::Substitution { pos, ch }
    }

    /// Builds an op from its wire marker (`+`, `-`, or `$`).
    pub fn from_marker(marker: char, pos: usize, ch: char) -> Option<Self> {
        match marker {
            '+' => Some(EditOp::Insertion { pos, ch }),
            '-' => Some(EditOp::Deletion { pos, ch }),
            '$' => Some(EditOp::Substitution { pos, ch }),
            _ => None,
        }
    }

    pub fn pos(&self) -> usize {
        match *self {
            EditOp::Insertion { pos, .. }
            | EditOp::Deletion { pos, .. }
            | EditOp::Substitution { pos, .. } => pos,
        }
    }

    pub fn ch(&self) -> char {
        match *self {
            EditOp::Insertion { ch, .. }
            | EditOp::Deletion { ch, .. }
            | EditOp::Substitution { ch, .. } => ch,
        }
    }

    /// Wire marker for this kind of op.
    pub fn marker(&self) -> char {
        match self {
            EditOp::Insertion { .. } => '+',
            EditOp::Deletion { .. } => '-',
            EditOp::Substitution { .. } => '$',
        }
    }

    pub fn is_insertion(&self) -> bool {
        matches!(self, EditOp::Insertion { .. })
    }

    /// Same op moved `n` positions to the right.
    pub fn shifted(self, n: usize) -> Self {
        match self {
            EditOp::Insertion { pos, ch } => EditOp::Insertion { pos: pos + n, ch },
            EditOp::Deletion { pos, ch } => EditOp::Deletion { pos: pos + n, ch },
            EditOp::Substitution { pos, ch } => EditOp::Substitution { pos: pos + n, ch },
        }
    }

    /// Applies this op to `buf` in place.
    ///
    /// Fails with [`TypingError::Range`] if the position lies outside the
    /// buffer; `buf` is left untouched in that case.
    pub fn apply(&self, buf: &mut Vec<char>) -> Result<()> {
        match *self {
            EditOp::Insertion { pos, ch } if pos <= buf.len() => buf.insert(pos, ch),
            EditOp::Deletion { pos, .. } if pos < buf.len() => {
                buf.remove(pos);
            }
            EditOp::Substitution { pos, ch } if pos < buf.len() => buf[pos] = ch,
            _ => {
                return Err(TypingError::Range(format!(
                    "{} does not fit a buffer of length {}",
                    self,
                    buf.len()
                )))
            }
        }
        Ok(())
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pos(), self.marker(), self.ch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn apply_each_kind() {
        let mut buf = chars("ac");
        EditOp::insertion(1, 'b').apply(&mut buf).unwrap();
        assert_eq!(buf, chars("abc"));
        EditOp::substitution(2, 'd').apply(&mut buf).unwrap();
        assert_eq!(buf, chars("abd"));
        EditOp::deletion(0, 'a').apply(&mut buf).unwrap();
        assert_eq!(buf, chars("bd"));
    }

    #[test]
    fn insertion_at_end_is_allowed() {
        let mut buf = chars("ab");
        EditOp::insertion(2, 'c').apply(&mut buf).unwrap();
        assert_eq!(buf, chars("abc"));
    }

    #[test]
    fn out_of_range_leaves_buffer_untouched() {
        let mut buf = chars("ab");
        let err = EditOp::deletion(2, 'x').apply(&mut buf).unwrap_err();
        assert!(matches!(err, TypingError::Range(_)));
        assert_eq!(buf, chars("ab"));
        assert!(EditOp::insertion(3, 'x').apply(&mut buf).is_err());
    }

    #[test]
    fn markers_round_trip() {
        for op in [
            EditOp::insertion(3, 'x'),
            EditOp::deletion(0, ','),
            EditOp::substitution(12, '7'),
        ] {
            assert_eq!(EditOp::from_marker(op.marker(), op.pos(), op.ch()), Some(op));
        }
        assert_eq!(EditOp::from_marker('?', 0, 'a'), None);
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(EditOp::insertion(7, ' ').to_string(), "7+ ");
        assert_eq!(EditOp::deletion(2, 'l').to_string(), "2-l");
        assert_eq!(EditOp::substitution(1, 'i').to_string(), "1$i");
    }

    #[test]
    fn shifted_moves_position_only() {
        let op = EditOp::deletion(1, 'q').shifted(4);
        assert_eq!(op, EditOp::deletion(5, 'q'));
    }
}
