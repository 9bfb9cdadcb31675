//! Typing speed calculations
//!
//! Speeds are characters or words per minute. A "word" is
//! [`Language::chars_per_word`] chars, so WPM is comparable across texts.

use crate::text::Language;
use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: f64 = 60_000.0;

/// Unit a typing speed is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    /// Characters per minute
    Cpm,
    /// Words per minute
    Wpm,
}

impl SpeedUnit {
    /// Speed in this unit for `chars` typed over `ms` milliseconds.
    pub fn calc_speed(self, chars: usize, ms: f64, language: &Language) -> f64 {
        match self {
            SpeedUnit::Cpm => calc_cpm(chars, ms),
            SpeedUnit::Wpm => calc_wpm(chars, ms, language),
        }
    }

    /// Converts `value` from this unit to `to`.
    pub fn convert(self, to: SpeedUnit, value: f64, language: &Language) -> f64 {
        match (self, to) {
            (SpeedUnit::Cpm, SpeedUnit::Wpm) => cpm_to_wpm(value, language),
            (SpeedUnit::Wpm, SpeedUnit::Cpm) => wpm_to_cpm(value, language),
            _ => value,
        }
    }

    /// Milliseconds needed to type `chars` at `speed` in this unit.
    pub fn time_ms(self, chars: usize, speed: f64, language: &Language) -> f64 {
        match self {
            SpeedUnit::Cpm => cpm_to_time(chars, speed),
            SpeedUnit::Wpm => wpm_to_time(chars, speed, language),
        }
    }
}

/// Characters per minute; 0 when no time has passed.
pub fn calc_cpm(chars: usize, ms: f64) -> f64 {
    let minutes = ms / MS_PER_MINUTE;
    if minutes == 0.0 {
        return 0.0;
    }
    chars as f64 / minutes
}

pub fn calc_wpm(chars: usize, ms: f64, language: &Language) -> f64 {
    cpm_to_wpm(calc_cpm(chars, ms), language)
}

pub fn cpm_to_wpm(cpm: f64, language: &Language) -> f64 {
    cpm / language.chars_per_word()
}

pub fn wpm_to_cpm(wpm: f64, language: &Language) -> f64 {
    wpm * language.chars_per_word()
}

/// Milliseconds needed to type `chars` at `cpm`; 0 for a zero speed.
pub fn cpm_to_time(chars: usize, cpm: f64) -> f64 {
    if cpm == 0.0 {
        return 0.0;
    }
    chars as f64 / cpm * MS_PER_MINUTE
}

pub fn wpm_to_time(chars: usize, wpm: f64, language: &Language) -> f64 {
    cpm_to_time(chars, wpm_to_cpm(wpm, language))
}
