//! Target-text description: language parameters and word layout

mod language;
mod layout;

pub use language::{Language, DEFAULT_CHARS_PER_WORD};
pub use layout::WordLayout;
