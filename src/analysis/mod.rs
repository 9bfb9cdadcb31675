//! Post-session analysis of typing logs
//!
//! - [`LogReplay`] steps through a log's edits
//! - [`LogAnalyzer`] derives accuracy, problem words, and per-segment speed
//! - [`speed`] holds the CPM/WPM arithmetic

mod analyzer;
mod replay;
mod segments;
pub mod speed;

pub use analyzer::LogAnalyzer;
pub use replay::{AppliedOp, LogReplay};
pub use segments::{split_segments, TextSegment};
pub use speed::SpeedUnit;
