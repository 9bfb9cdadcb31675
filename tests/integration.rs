//! Integration tests for typing-log
//!
//! These tests drive the input model the way a text field would, then push
//! the resulting log through the codec, the analyzer, and the report.

use typing_log::config::Config;
use typing_log::input::Lifecycle;
use typing_log::log::codec;
use typing_log::{
    AnalysisReport, InputModel, Language, LogAnalyzer, LogReplay, ManualClock, TypingError,
    UpdateResult,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A text field bound to an input model, with its own clock.
///
/// Every submitted snapshot happens 10 ms after the previous one.
struct Field {
    model: InputModel,
    clock: ManualClock,
    value: String,
}

impl Field {
    fn new(text: &str, language: Language, accept_prefixes: bool) -> Self {
        let mut model = InputModel::new(text, language, accept_prefixes).unwrap();
        let clock = ManualClock::new();
        model.start_timing(Box::new(clock.clone())).unwrap();
        Self {
            model,
            clock,
            value: String::new(),
        }
    }

    fn submit(&mut self, snapshot: &str) -> Option<UpdateResult> {
        self.clock.advance(10);
        let result = self.model.update(snapshot).unwrap();
        match &result {
            Some(r) => self.value = r.new_input_value.clone(),
            None => self.value = snapshot.to_string(),
        }
        result
    }

    /// Types `s` one char at a time onto the current field value.
    fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            let mut next = self.value.clone();
            next.push(c);
            self.submit(&next);
        }
    }

    /// Inserts `s` at char position `pos` of the field, as one update.
    fn insert_at(&mut self, pos: usize, s: &str) -> Option<UpdateResult> {
        let mut chars: Vec<char> = self.value.chars().collect();
        chars.splice(pos..pos, s.chars());
        let next: String = chars.into_iter().collect();
        self.submit(&next)
    }

    /// Drags the chars in `start..end` so they begin at `to` in what is
    /// left of the field, as one update.
    fn move_range(&mut self, start: usize, end: usize, to: usize) -> Option<UpdateResult> {
        let mut chars: Vec<char> = self.value.chars().collect();
        let moved: Vec<char> = chars.drain(start..end).collect();
        chars.splice(to..to, moved);
        let next: String = chars.into_iter().collect();
        self.submit(&next)
    }

    fn backspace(&mut self, times: usize) {
        for _ in 0..times {
            let mut next = self.value.clone();
            next.pop();
            self.submit(&next);
        }
    }
}

// ---------------------------------------------------------------------------
// Input model to wire format
// ---------------------------------------------------------------------------

#[test]
fn partial_word_mode_log_formats_exactly() {
    let mut field = Field::new("Hi yo", Language::english(), false);
    field.submit("H");
    field.submit("Hi");

    let log = field.model.typing_log();
    assert_eq!(codec::format(&log), "TLv1,en,5,H10i10 -20y0o0|0,2,10,0+H,10,1+i,");
    assert_eq!(field.model.char_cursor(), 0);
    assert_eq!(field.value, "Hi");
}

#[test]
fn fully_typed_word_mode_log_formats_exactly() {
    let mut field = Field::new("Hi yo", Language::english(), false);
    field.type_str("Hi yo");

    assert!(field.model.is_finished());
    let log = field.model.typing_log();
    assert_eq!(
        codec::format(&log),
        "TLv1,en,5,H10i10 10y10o10|0,3,10,0+H,10,1+i,10,2+ ,3,2,10,0+y,10,1+o,"
    );
    assert_eq!(log.num_chars_typed(), 5);
    assert_eq!(log.total_elapsed_ms(), 50);
}

#[test]
fn prefix_mode_clears_field_as_chars_match() {
    let mut field = Field::new("Hi yo", Language::english(), true);
    let result = field.submit("H").unwrap();
    assert_eq!(result.accepted_input_prefix_length, 1);
    assert_eq!(result.new_input_value, "");
    assert_eq!(result.new_char_cursor, 1);

    field.type_str("i yo");
    assert!(field.model.is_finished());
    let log = field.model.typing_log();
    assert_eq!(log.char_timings(), &[10, 20, 30, 40, 50]);
    // each entry starts where the previous one accepted up to
    let starts: Vec<usize> = log.edit_log().iter().map(|e| e.start_pos).collect();
    assert_eq!(starts, vec![0, 1, 2, 3, 4]);
}

// ---------------------------------------------------------------------------
// Full pipeline tests
// ---------------------------------------------------------------------------

#[test]
fn corrected_session_through_codec_and_analyzer() {
    let mut field = Field::new("Foo bar hello world.", Language::english(), false);
    field.type_str("Foo ");
    assert_eq!(field.model.word_cursor(), 1);
    assert_eq!(field.value, "");

    field.type_str("bxy");
    assert_eq!(field.value, "bxy");
    let last = field.model.last_update_result().unwrap();
    assert_eq!(last.correct_input_prefix_length, 1);
    assert_eq!(last.accepted_input_prefix_length, 0);

    field.backspace(2);
    field.type_str("ar ");
    assert_eq!(field.model.word_cursor(), 2);
    field.type_str("hello ");
    field.type_str("world.");

    assert!(field.model.is_finished());
    assert_eq!(field.model.lifecycle(), Lifecycle::Finished);
    assert_eq!(field.model.word_cursor(), 4);
    assert_eq!(field.model.char_cursor(), 20);
    assert_eq!(field.model.num_chars_accepted(), 20);

    let encoded = codec::format(&field.model.typing_log());
    let log = codec::parse(&encoded).unwrap();
    assert_eq!(log, field.model.typing_log());
    assert_eq!(codec::format(&log), encoded);

    let analyzer = LogAnalyzer::new(log);
    assert_eq!(analyzer.total_op_count(), 24);
    assert_eq!(analyzer.error_op_count(), 4);
    assert!((analyzer.calc_accuracy() - 20.0 / 24.0).abs() < 1e-9);
    assert_eq!(analyzer.words_with_errors(), vec!["bar".to_string()]);
    assert_eq!(analyzer.final_buffer(), "Foo bar hello world.");

    assert_eq!(field.submit("more"), None);
    assert_eq!(field.model.char_cursor(), 20);
}

#[test]
fn corrected_session_with_prefixes_accepted() {
    let mut field = Field::new("Foo bar hello world.", Language::english(), true);
    field.type_str("Foo b");
    assert_eq!(field.model.char_cursor(), 5);
    assert_eq!(field.value, "");

    field.type_str("xy");
    let last = field.model.last_update_result().unwrap();
    assert_eq!(last.accepted_input_prefix_length, 0);
    assert_eq!(last.correct_input_prefix_length, 0);
    assert_eq!(last.new_char_cursor, 5);

    field.backspace(2);
    field.type_str("ar hello world.");
    assert!(field.model.is_finished());
    assert_eq!(field.model.word_cursor(), 4);
    assert_eq!(field.model.char_cursor(), 20);
    assert_eq!(field.model.num_chars_accepted(), 20);

    let log = codec::parse(&codec::format(&field.model.typing_log())).unwrap();
    let analyzer = LogAnalyzer::new(log);
    assert_eq!(analyzer.total_op_count(), 24);
    assert!((analyzer.calc_accuracy() - 20.0 / 24.0).abs() < 1e-9);
    assert_eq!(analyzer.words_with_errors(), vec!["bar".to_string()]);
}

#[test]
fn delimiter_inserted_mid_field_accepts_word() {
    let mut field = Field::new("Foo bar hello world.", Language::english(), false);
    field.type_str("Foo ");
    // pasted as one update
    let result = field.submit("bar").unwrap();
    assert_eq!(result.accepted_input_prefix_length, 0);
    assert_eq!(result.correct_input_prefix_length, 3);
    field.type_str("hell");
    assert_eq!(field.model.char_cursor(), 4);

    let result = field.insert_at(3, " ").unwrap();
    assert_eq!(result.accepted_input_prefix_length, 4);
    assert_eq!(result.new_input_value, "hell");
    assert_eq!(result.correct_input_prefix_length, 4);
    assert_eq!(result.new_char_cursor, 8);
    assert_eq!(result.new_word_cursor, 2);

    let log = field.model.typing_log();
    let entry = log.edit_log().last().unwrap();
    assert_eq!(entry.start_pos, 4);
    assert_eq!(entry.ops, vec![typing_log::EditOp::insertion(3, ' ')]);

    field.type_str("o world.");
    assert!(field.model.is_finished());
    let analyzer = LogAnalyzer::new(field.model.typing_log());
    assert_eq!(analyzer.final_buffer(), "Foo bar hello world.");
    assert_eq!(analyzer.calc_accuracy(), 1.0);
    assert!(analyzer.words_with_errors().is_empty());
}

#[test]
fn dragging_suffix_into_place_finishes_text() {
    let mut field = Field::new("Foo world.", Language::english(), true);
    field.type_str("Foo ");
    field.submit("ld.");
    field.type_str("wor123");
    assert_eq!(field.value, "ld.wor123");
    assert_eq!(field.model.char_cursor(), 4);

    let result = field.move_range(0, 3, 3).unwrap();
    assert_eq!(result.accepted_input_prefix_length, 6);
    assert_eq!(result.new_input_value, "123");
    assert_eq!(result.correct_input_prefix_length, 0);
    assert_eq!(result.new_char_cursor, 10);
    assert!(field.model.is_finished());

    let log = codec::parse(&codec::format(&field.model.typing_log())).unwrap();
    let mut replay = LogReplay::new(&log);
    replay.seek_to_end();
    assert_eq!(replay.skipped_ops(), 0);
    assert_eq!(replay.buffer(), "Foo world.123");
}

#[test]
fn logographic_junk_before_correct_char() {
    let mut field = Field::new("asdfqwerty", Language::chinese(), false);
    field.submit("a");

    let result = field.submit("#%s").unwrap();
    assert_eq!(result.accepted_input_prefix_length, 0);
    assert_eq!(result.new_input_value, "#%s");
    assert_eq!(result.correct_input_prefix_length, 0);
    assert_eq!(result.new_char_cursor, 1);
    assert_eq!(result.new_word_cursor, 1);

    // drag the correct char in front of the junk
    let result = field.move_range(2, 3, 0).unwrap();
    assert_eq!(result.accepted_input_prefix_length, 1);
    assert_eq!(result.new_input_value, "#%");
    assert_eq!(result.new_char_cursor, 2);

    let log = field.model.typing_log();
    let mut replay = LogReplay::new(&log);
    replay.seek_to_edit(3);
    assert_eq!(replay.buffer(), "as#%");

    field.backspace(2);
    field.type_str("dfqwerty");
    assert!(field.model.is_finished());
    let log = codec::parse(&codec::format(&field.model.typing_log())).unwrap();
    assert_eq!(LogAnalyzer::new(log).final_buffer(), "asdfqwerty");
}

#[test]
fn logographic_session_accepts_each_char() {
    let mut field = Field::new("asdfqwerty", Language::chinese(), false);

    let result = field.submit("a").unwrap();
    assert_eq!(result.accepted_input_prefix_length, 1);
    assert_eq!(result.new_char_cursor, 1);
    assert_eq!(result.new_word_cursor, 1);

    let result = field.submit("s#%d").unwrap();
    assert_eq!(result.accepted_input_prefix_length, 1);
    assert_eq!(result.new_input_value, "#%d");
    assert_eq!(result.correct_input_prefix_length, 0);
    assert_eq!(result.new_char_cursor, 2);

    let result = field.submit("d#%").unwrap();
    assert_eq!(result.accepted_input_prefix_length, 1);
    assert_eq!(result.new_input_value, "#%");
    assert_eq!(result.new_char_cursor, 3);

    field.backspace(2);
    assert_eq!(field.value, "");
    field.type_str("fqwerty");

    assert!(field.model.is_finished());
    assert_eq!(field.model.char_cursor(), 10);
    assert_eq!(field.model.word_cursor(), 10);

    let log = codec::parse(&codec::format(&field.model.typing_log())).unwrap();
    assert!(log.language().is_logographic());
    assert_eq!(log.num_chars_typed(), 10);
    let analyzer = LogAnalyzer::new(log);
    assert!(analyzer.calc_accuracy() < 1.0);
    assert_eq!(analyzer.final_buffer(), "asdfqwerty");
}

#[test]
fn update_before_start_leaves_no_trace() {
    let mut model = InputModel::new("Foo", Language::english(), true).unwrap();
    assert!(matches!(model.update("F"), Err(TypingError::State(_))));
    assert!(matches!(model.update(None), Err(TypingError::Input(_))));
    assert_eq!(model.lifecycle(), Lifecycle::NotStarted);
    assert!(model.typing_log().edit_log().is_empty());
}

// ---------------------------------------------------------------------------
// Config and report tests
// ---------------------------------------------------------------------------

#[test]
fn config_drives_model_and_report() {
    let toml_str = r#"
[input]
accept_prefixes = false

[analysis]
segment_count = 2

[language]
default_code = "en"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    let language = config.default_language().unwrap();

    let mut model =
        InputModel::new("Hi yo", language, config.input.accept_prefixes).unwrap();
    let clock = ManualClock::new();
    model.start_timing(Box::new(clock.clone())).unwrap();
    for (ms, snapshot) in [(100, "H"), (200, "Hi"), (300, "Hi "), (400, "y"), (500, "yo")] {
        clock.set(ms);
        model.update(snapshot).unwrap();
    }
    assert!(model.is_finished());

    let analyzer = LogAnalyzer::new(model.typing_log());
    let report = AnalysisReport::new(&analyzer, config.analysis.segment_count).unwrap();
    assert_eq!(report.metadata.language, "en");
    assert_eq!(report.summary.accuracy, 1.0);
    assert_eq!(report.summary.duration_ms, 500);
    assert_eq!(report.segments.len(), 2);
    assert_eq!(report.segments[0].text, "Hi ");
    assert_eq!(report.segments[1].text, "yo");
    assert!(report.segments.iter().all(|s| s.wpm > 0.0));

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["chars_typed"], 5);
    assert_eq!(value["segments"][1]["start_pos"], 3);
}

#[test]
fn report_lists_problem_words() {
    let log = codec::parse("TLv1,en,5,H10i20 10y10o10|0,4,10,0+H,10,1+o,10,1$i,10,2+ ,3,2,10,0+y,10,1+o,")
        .unwrap();
    let report = AnalysisReport::new(&LogAnalyzer::new(log), 8).unwrap();
    assert_eq!(report.summary.words_with_errors, vec!["Hi".to_string()]);
    assert_eq!(report.summary.error_ops, 2);
    assert!(report.to_text().contains("Problem words: Hi"));
}
