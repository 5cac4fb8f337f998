//! # Core Module
//!
//! Shared configuration types for the reminder features.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial creation with config module

pub mod config;

// Re-export commonly used items
pub use config::{Config, CountdownConfig, NotifierConfig, RallyConfig, RALLY_COMMAND};
