//! # Command System
//!
//! Chat command (!) handling for inbound player messages.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Round-end fan-out through the registry
//! - 1.0.0: Initial handler trait and registry

pub mod handler;
pub mod registry;

// Re-export handler infrastructure
pub use handler::ChatCommandHandler;
pub use registry::CommandRegistry;
