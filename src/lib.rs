//! typing-log - keystroke tracking and typing analysis
//!
//! Tracks live input against a target text, records every correction in a
//! compact typing log, and analyzes finished logs for accuracy and speed.

pub mod analysis;
pub mod config;
pub mod edit;
pub mod error;
pub mod input;
pub mod log;
pub mod report;
pub mod text;
pub mod utils;

pub use analysis::{LogAnalyzer, LogReplay, TextSegment};
pub use config::Config;
pub use edit::{edit_distance, edit_sequence, EditOp, EditSequence};
pub use error::{LogSection, Result, TypingError};
pub use input::{Clock, InputModel, ManualClock, SystemClock, UpdateResult};
pub use log::{EditEntry, TypingLog};
pub use report::AnalysisReport;
pub use text::Language;
