//! Live input tracking
//!
//! [`InputModel`] consumes snapshots of a text field while the user types
//! and records a [`TypingLog`](crate::log::TypingLog) of the session.

mod clock;
mod model;

pub use clock::{Clock, ManualClock, SystemClock};
pub use model::{InputModel, Lifecycle, UpdateResult};
