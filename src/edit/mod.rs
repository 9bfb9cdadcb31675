//! Minimal edit scripts between strings
//!
//! The input model diffs consecutive input snapshots with
//! [`edit_sequence`], and the analyzer replays the resulting [`EditOp`]s.

mod ops;
mod sequence;

pub use ops::EditOp;
pub use sequence::{edit_distance, edit_distance_chars, edit_sequence, edit_sequence_chars, EditSequence};
