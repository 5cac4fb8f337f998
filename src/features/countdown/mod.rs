//! # Personal Timer Feature
//!
//! Free-text one-shot reminders: `!timer mbt 30` brings the note back
//! after 30 minutes.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0
//! - **Toggleable**: true

pub mod timer;

pub use timer::CountdownTimer;
