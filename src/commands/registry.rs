//! Command handler registry
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Round-end fan-out to registered handlers
//! - 1.0.0: Initial implementation for handler dispatch

use log::{debug, error, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::handler::ChatCommandHandler;

/// Registry mapping command names to handlers
///
/// The registry allows handlers to be registered and looked up by command
/// name. Multiple command names can map to the same handler if they share
/// logic; the round-end signal reaches each handler exactly once no matter
/// how many names it registered.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(scheduler));
/// registry.register(Arc::new(countdown));
///
/// registry.dispatch_command("76561198000000001", "rally", "30").await;
/// ```
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn ChatCommandHandler>>,
    registered: Vec<Arc<dyn ChatCommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for its declared command names
    ///
    /// Names are matched case-insensitively. A name already claimed by an
    /// earlier handler stays with that handler; the collision is logged and
    /// skipped.
    pub fn register(&mut self, handler: Arc<dyn ChatCommandHandler>) {
        for name in handler.command_names() {
            let name = name.trim().to_lowercase();
            if name.is_empty() {
                warn!("Ignored empty command name during registration");
                continue;
            }
            if self.handlers.contains_key(&name) {
                warn!("Command name {name:?} already registered, keeping the first handler");
                continue;
            }
            self.handlers.insert(name, Arc::clone(&handler));
        }
        self.registered.push(handler);
    }

    /// Get handler for a command name
    ///
    /// Returns None if no handler is registered for the given name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ChatCommandHandler>> {
        self.handlers.get(&name.trim().to_lowercase()).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&name.trim().to_lowercase())
    }

    /// Number of registered command names
    ///
    /// Note: This counts command names, not unique handlers.
    /// A handler registered for multiple names will be counted multiple times.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Get all registered command names
    pub fn command_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.keys().map(String::as_str)
    }

    /// Route one inbound chat command to its handler
    ///
    /// Unknown commands are ignored; a handler error is logged and does not
    /// propagate to the inbound event loop.
    pub async fn dispatch_command(&self, player_id: &str, command: &str, body: &str) {
        match self.get(command) {
            Some(handler) => {
                if let Err(e) = handler.handle_command(player_id, command, body).await {
                    error!("Handler for command {command:?} failed: {e:#}");
                }
            }
            None => {
                debug!("No handler registered for chat command {command:?}");
            }
        }
    }

    /// Deliver the round-end signal to every registered handler, once each
    pub async fn dispatch_round_ended(&self) {
        for handler in &self.registered {
            handler.on_round_ended().await;
        }
    }
}
