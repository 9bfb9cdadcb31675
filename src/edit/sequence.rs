//! Levenshtein edit scripts
//!
//! Common prefixes and suffixes are stripped before the quadratic part runs,
//! so diffing two consecutive input snapshots (which usually differ by one
//! keystroke) stays cheap.

use super::EditOp;
use crate::error::Result;
use crate::utils::{common_prefix_len, common_suffix_len, to_chars};

/// An ordered list of [`EditOp`]s that turns one string into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSequence {
    ops: Vec<EditOp>,
}

impl EditSequence {
    pub fn new(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<EditOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    /// Same sequence with every position moved `n` to the right.
    pub fn shift(self, n: usize) -> Self {
        if n == 0 {
            return self;
        }
        Self {
            ops: self.ops.into_iter().map(|op| op.shifted(n)).collect(),
        }
    }

    /// Applies every op in order to `buf`.
    ///
    /// Stops at the first op that does not fit; ops before it stay applied.
    pub fn apply_to(&self, buf: &mut Vec<char>) -> Result<()> {
        self.ops.iter().try_for_each(|op| op.apply(buf))
    }

    /// Applies the sequence to `s` and returns the result.
    pub fn apply(&self, s: &str) -> Result<String> {
        let mut buf = to_chars(s);
        self.apply_to(&mut buf)?;
        Ok(buf.into_iter().collect())
    }
}

impl From<Vec<EditOp>> for EditSequence {
    fn from(ops: Vec<EditOp>) -> Self {
        Self::new(ops)
    }
}

impl IntoIterator for EditSequence {
    type Item = EditOp;
    type IntoIter = std::vec::IntoIter<EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a EditSequence {
    type Item = &'a EditOp;
    type IntoIter = std::slice::Iter<'a, EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Minimal edit script turning `a` into `b`.
///
/// With `allow_substitution == false` only insertions and deletions are used.
/// When several scripts are minimal the choice is deterministic: walking back
/// from the end, an insertion is preferred over a deletion, and a deletion over
/// a substitution.
///
/// ```
/// use typing_log::edit::{edit_sequence, EditOp};
///
/// let seq = edit_sequence("Foo", "Fao", true);
/// assert_eq!(seq.ops(), &[EditOp::substitution(1, 'a')]);
/// assert_eq!(seq.apply("Foo").unwrap(), "Fao");
/// ```
pub fn edit_sequence(a: &str, b: &str, allow_substitution: bool) -> EditSequence {
    edit_sequence_chars(&to_chars(a), &to_chars(b), allow_substitution)
}

/// [`edit_sequence`] over char slices.
pub fn edit_sequence_chars(a: &[char], b: &[char], allow_substitution: bool) -> EditSequence {
    // suffix first so that e.g. "aa" -> "a" deletes at position 0
    let suffix = common_suffix_len(a, b);
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);
    let prefix = common_prefix_len(a, b);
    let (s, t) = (&a[prefix..], &b[prefix..]);

    let ops = if s.is_empty() {
        t.iter().enumerate().map(|(k, &c)| EditOp::insertion(k, c)).collect()
    } else if t.is_empty() {
        s.iter().map(|&c| EditOp::deletion(0, c)).collect()
    } else {
        CostMatrix::build(s, t, allow_substitution).backtrace(s, t)
    };

    EditSequence::new(ops).shift(prefix)
}

/// Levenshtein distance between `a` and `b`.
pub fn edit_distance(a: &str, b: &str, allow_substitution: bool) -> usize {
    edit_distance_chars(&to_chars(a), &to_chars(b), allow_substitution)
}

/// [`edit_distance`] over char slices. Uses two rows of memory.
pub fn edit_distance_chars(a: &[char], b: &[char], allow_substitution: bool) -> usize {
    let suffix = common_suffix_len(a, b);
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);
    let prefix = common_prefix_len(a, b);
    let (s, t) = (&a[prefix..], &b[prefix..]);

    if s.is_empty() || t.is_empty() {
        return s.len() + t.len();
    }

    let mut prev: Vec<usize> = (0..=t.len()).collect();
    let mut cur = vec![0; t.len() + 1];
    for (i, &sc) in s.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &tc) in t.iter().enumerate() {
            cur[j + 1] = if sc == tc {
                prev[j]
            } else {
                let mut best = cur[j].min(prev[j + 1]);
                if allow_substitution {
                    best = best.min(prev[j]);
                }
                best + 1
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[t.len()]
}

/// Full DP table, kept so the script can be recovered by walking back.
struct CostMatrix {
    cols: usize,
    cells: Vec<u32>,
    allow_substitution: bool,
}

#[derive(Clone, Copy)]
enum Step {
    Insert,
    Delete,
    Substitute,
}

impl CostMatrix {
    fn build(s: &[char], t: &[char], allow_substitution: bool) -> Self {
        let cols = t.len() + 1;
        let mut m = Self {
            cols,
            cells: vec![0; (s.len() + 1) * cols],
            allow_substitution,
        };
        for j in 0..cols {
            m.set(0, j, j as u32);
        }
        for i in 1..=s.len() {
            m.set(i, 0, i as u32);
            for j in 1..cols {
                let cost = if s[i - 1] == t[j - 1] {
                    m.get(i - 1, j - 1)
                } else {
                    let (_, best) = m.cheapest(i, j);
                    best + 1
                };
                m.set(i, j, cost);
            }
        }
        m
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    fn set(&mut self, i: usize, j: usize, v: u32) {
        self.cells[i * self.cols + j] = v;
    }

    /// Cheapest predecessor of cell (i, j) on a mismatch, ties resolved
    /// insert > delete > substitute.
    fn cheapest(&self, i: usize, j: usize) -> (Step, u32) {
        let ins = self.get(i, j - 1);
        let del = self.get(i - 1, j);
        let sub = if self.allow_substitution {
            self.get(i - 1, j - 1)
        } else {
            u32::MAX
        };
        if ins <= del && ins <= sub {
            (Step::Insert, ins)
        } else if del <= sub {
            (Step::Delete, del)
        } else {
            (Step::Substitute, sub)
        }
    }

    fn backtrace(&self, s: &[char], t: &[char]) -> Vec<EditOp> {
        let mut ops = Vec::with_capacity(self.get(s.len(), t.len()) as usize);
        let (mut i, mut j) = (s.len(), t.len());
        while i > 0 || j > 0 {
            if i == 0 {
                ops.push(EditOp::insertion(j - 1, t[j - 1]));
                j -= 1;
            } else if j == 0 {
                ops.push(EditOp::deletion(0, s[i - 1]));
                i -= 1;
            } else if s[i - 1] == t[j - 1] {
                i -= 1;
                j -= 1;
            } else {
                match self.cheapest(i, j).0 {
                    Step::Insert => {
                        ops.push(EditOp::insertion(j - 1, t[j - 1]));
                        j -= 1;
                    }
                    Step::Delete => {
                        ops.push(EditOp::deletion(j, s[i - 1]));
                        i -= 1;
                    }
                    Step::Substitute => {
                        ops.push(EditOp::substitution(j - 1, t[j - 1]));
                        i -= 1;
                        j -= 1;
                    }
                }
            }
        }
        ops.reverse();
        ops
    }
}
