//! Analysis report and export functionality

use crate::analysis::{LogAnalyzer, TextSegment};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Complete analysis report for one typing log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Summary statistics
    pub summary: ReportSummary,
    /// Speed per text segment
    pub segments: Vec<SegmentEntry>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// Report generation timestamp
    pub generated_at: String,
    /// Application version
    pub version: String,
    /// Language code of the text
    pub language: String,
    /// Text length in chars
    pub text_length: usize,
}

/// Summary statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    /// Fraction of edit ops that were not errors
    pub accuracy: f64,
    /// Overall words per minute
    pub wpm: f64,
    /// Leading chars typed correctly
    pub chars_typed: usize,
    /// Time of the last edit in ms
    pub duration_ms: u64,
    pub total_ops: usize,
    pub error_ops: usize,
    /// Edits still separating the final input from the text
    pub uncorrected_errors: usize,
    /// Words that needed a correction
    pub words_with_errors: Vec<String>,
}

/// Single segment entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentEntry {
    pub start_pos: usize,
    pub end_pos: usize,
    pub text: String,
    pub wpm: f64,
}

impl SegmentEntry {
    fn new(segment: &TextSegment, text: &str) -> Self {
        Self {
            start_pos: segment.start_pos,
            end_pos: segment.end_pos,
            text: segment.text_of(text),
            wpm: segment.wpm,
        }
    }
}

impl AnalysisReport {
    /// Create a report from an analyzed log, splitting the text into
    /// `segment_count` segments.
    pub fn new(analyzer: &LogAnalyzer, segment_count: usize) -> Result<Self> {
        let log = analyzer.log();
        let now: DateTime<Utc> = Utc::now();
        let segments = analyzer
            .segment_wpms(segment_count)?
            .iter()
            .map(|s| SegmentEntry::new(s, log.text()))
            .collect();

        Ok(Self {
            metadata: ReportMetadata {
                generated_at: now.to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                language: log.language().code().to_string(),
                text_length: log.text_len(),
            },
            summary: ReportSummary {
                accuracy: analyzer.calc_accuracy(),
                wpm: analyzer.calc_wpm(),
                chars_typed: log.num_chars_typed(),
                duration_ms: log.total_elapsed_ms(),
                total_ops: analyzer.total_op_count(),
                error_ops: analyzer.error_op_count(),
                uncorrected_errors: analyzer.uncorrected_error_count(),
                words_with_errors: analyzer.words_with_errors(),
            },
            segments,
        })
    }

    /// Export report to JSON file
    pub fn export_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export report to JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text rendering for terminals
    pub fn to_text(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Language: {}  Length: {} chars",
            self.metadata.language, self.metadata.text_length
        );
        let _ = writeln!(
            out,
            "Accuracy: {:.1}%  ({} of {} edits were errors)",
            s.accuracy * 100.0,
            s.error_ops,
            s.total_ops
        );
        let _ = writeln!(
            out,
            "Speed:    {:.1} WPM  ({} chars in {:.1}s)",
            s.wpm,
            s.chars_typed,
            s.duration_ms as f64 / 1000.0
        );
        if s.uncorrected_errors > 0 {
            let _ = writeln!(out, "Uncorrected: {} edit(s) from the text", s.uncorrected_errors);
        }
        if !s.words_with_errors.is_empty() {
            let _ = writeln!(out, "Problem words: {}", s.words_with_errors.join(", "));
        }
        for (i, seg) in self.segments.iter().enumerate() {
            let _ = writeln!(
                out,
                "  #{:<2} {:>7.1} WPM  {:?}",
                i + 1,
                seg.wpm,
                seg.text
            );
        }
        out
    }
}
