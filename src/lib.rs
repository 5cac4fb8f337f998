// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Delivery layer - outbound private notices
pub mod notify;
pub mod transport;

// Application layer - chat command dispatch
pub mod commands;

// Re-export core config
pub use crate::core::{Config, CountdownConfig, NotifierConfig, RallyConfig};

// Re-export feature items
pub use features::{
    // Countdown
    CountdownTimer,
    // Rally
    PauseStore, RallyScheduler, TimerRegistry,
};

// Re-export dispatch and delivery seams
pub use commands::{ChatCommandHandler, CommandRegistry};
pub use notify::Notifier;
pub use transport::NoticeTransport;
