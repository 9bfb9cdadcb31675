//! Language descriptors
//!
//! A language only carries what tokenization and speed calculation need:
//! a word delimiter, whether the script is tokenized one char per word,
//! and how many chars make up a "word" for WPM.

use serde::{Deserialize, Serialize};

/// Codes that are tokenized one char per word.
const LOGOGRAPHIC_CODES: &[&str] = &["zh", "zh-tw", "ja", "th"];

/// Known language codes and their English names.
const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("af", "Afrikaans"),
    ("sq", "Albanian"),
    ("ar", "Arabic"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("zh", "Chinese"),
    ("zh-tw", "Chinese (Traditional)"),
    ("hr", "Croatian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("nl", "Dutch"),
    ("et", "Estonian"),
    ("tl", "Filipino"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("gl", "Galician"),
    ("de", "German"),
    ("el", "Greek"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("ga", "Irish"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lv", "Latvian"),
    ("lt", "Lithuanian"),
    ("mk", "Macedonian"),
    ("ms", "Malay"),
    ("mt", "Maltese"),
    ("no", "Norwegian"),
    ("fa", "Persian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sr", "Serbian (Cyrillic)"),
    ("sr-latn", "Serbian (Latin)"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("es", "Spanish"),
    ("sw", "Swahili"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("cy", "Welsh"),
    ("yi", "Yiddish"),
];

/// Standard chars-per-word used for WPM in alphabetic languages
pub const DEFAULT_CHARS_PER_WORD: f64 = 5.0;

/// Tokenization and speed parameters for the language of a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    code: String,
    delimiter: String,
    logographic: bool,
    chars_per_word: f64,
}

impl Language {
    /// Looks up a known language by its lowercase code (`"en"`, `"zh-tw"`, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        LANGUAGES.iter().find(|(c, _)| *c == code).map(|(c, _)| {
            let logographic = LOGOGRAPHIC_CODES.contains(c);
            let chars_per_word = match *c {
                "ko" => 2.5,
                "th" => 3.75,
                _ if logographic => 1.0,
                _ => DEFAULT_CHARS_PER_WORD,
            };
            Self {
                code: (*c).to_string(),
                delimiter: if logographic { String::new() } else { " ".to_string() },
                logographic,
                chars_per_word,
            }
        })
    }

    /// Builds an ad-hoc descriptor.
    ///
    /// Logographic languages ignore `delimiter` when tokenizing. A log using
    /// a code unknown to [`Language::from_code`] can be formatted but not
    /// parsed back.
    pub fn custom(
        code: impl Into<String>,
        delimiter: impl Into<String>,
        logographic: bool,
        chars_per_word: f64,
    ) -> Self {
        Self {
            code: code.into(),
            delimiter: delimiter.into(),
            logographic,
            chars_per_word,
        }
    }

    pub fn english() -> Self {
        Self::custom("en", " ", false, DEFAULT_CHARS_PER_WORD)
    }

    pub fn chinese() -> Self {
        Self::custom("zh", "", true, 1.0)
    }

    pub fn japanese() -> Self {
        Self::custom("ja", "", true, 1.0)
    }

    /// All codes accepted by [`Language::from_code`].
    pub fn known_codes() -> impl Iterator<Item = &'static str> {
        LANGUAGES.iter().map(|(code, _)| *code)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn is_logographic(&self) -> bool {
        self.logographic
    }

    pub fn chars_per_word(&self) -> f64 {
        self.chars_per_word
    }

    /// English name for known codes, the code itself otherwise.
    pub fn name(&self) -> &str {
        match LANGUAGES.iter().find(|(c, _)| *c == self.code) {
            Some(&(_, name)) => name,
            None => self.code.as_str(),
        }
    }

    /// Splits `text` into words.
    ///
    /// Logographic text yields one word per char. Otherwise the text is split
    /// on the delimiter, so doubled or leading delimiters produce empty words.
    /// A single trailing delimiter belongs to the last word.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        if self.logographic || self.delimiter.is_empty() {
            return text.chars().map(String::from).collect();
        }
        let mut words: Vec<String> = text.split(self.delimiter.as_str()).map(String::from).collect();
        if words.len() > 1 && words.last().is_some_and(String::is_empty) {
            words.pop();
        }
        words
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::english()
    }
}
