//! # Feature Modules
//!
//! Player-facing reminder features. Each feature implements
//! `ChatCommandHandler` and owns its own timers; this module carries the
//! manifest used for version reporting.

pub mod countdown;
pub mod rally;

pub use countdown::CountdownTimer;
pub use rally::{PauseStore, RallyScheduler, TimerRegistry};

/// Static metadata about one feature
#[derive(Debug, Clone, Copy)]
pub struct FeatureInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub toggleable: bool,
}

/// All features compiled into this crate
pub static FEATURES: &[FeatureInfo] = &[
    FeatureInfo {
        id: "rally_timer",
        name: "Rally Timer",
        version: "1.2.0",
        description: "Recurring notices ahead of each rally spawn wave",
        toggleable: true,
    },
    FeatureInfo {
        id: "personal_timer",
        name: "Personal Timer",
        version: "1.0.0",
        description: "One-shot free-text reminders",
        toggleable: true,
    },
];

/// Feature manifest for version reporting
pub fn get_features() -> &'static [FeatureInfo] {
    FEATURES
}

/// Crate version from the manifest
pub fn get_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
