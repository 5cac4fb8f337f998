//! # Rally Timer Feature
//!
//! Recurring notices ahead of each rally spawn wave. A player reports the
//! on-screen rally clock once; the feature works out when the next spawn
//! lands and warns them a configurable number of seconds early, every wave,
//! until they stop it.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.2.0: Pause state cleared on re-arm, informational reply while the
//!   first notice is pending
//! - 1.1.0: Dedicated pause alias family and `!rally pause`
//! - 1.0.0: Initial arm/stop cycle with per-player schedules

pub mod delay;
pub mod intent;
pub mod pause;
pub mod registry;
pub mod scheduler;

pub use delay::{initial_delay, CYCLE_SECONDS};
pub use intent::{resolve, Intent};
pub use pause::PauseStore;
pub use registry::{SchedulePhase, TimerRegistry};
pub use scheduler::RallyScheduler;
