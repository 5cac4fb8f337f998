//! Chat command handler trait and infrastructure
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;

/// Trait for chat command handlers
///
/// Each feature implements this trait to process one or more chat commands.
/// Handlers are registered with a CommandRegistry and dispatched based on
/// command name. The round-end signal is fanned out to every handler so
/// features can drop per-round state.
///
/// # Example
///
/// ```ignore
/// pub struct GreeterHandler;
///
/// #[async_trait]
/// impl ChatCommandHandler for GreeterHandler {
///     fn command_names(&self) -> Vec<String> {
///         vec!["hello".to_string()]
///     }
///
///     async fn handle_command(&self, player_id: &str, _command: &str, _body: &str) -> Result<()> {
///         // Reply to the player here
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait ChatCommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    ///
    /// Owned strings because alias lists come from configuration. A handler
    /// can process multiple commands if they share logic.
    fn command_names(&self) -> Vec<String>;

    /// Handle one chat command
    ///
    /// # Arguments
    ///
    /// * `player_id` - Stable id of the player who sent the command
    /// * `command` - The command name that matched, without the `!` prefix
    /// * `body` - Everything after the command name, untrimmed
    async fn handle_command(&self, player_id: &str, command: &str, body: &str) -> Result<()>;

    /// Called once when the current round ends
    async fn on_round_ended(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe (can be used with dyn)
    fn _assert_object_safe(_: &dyn ChatCommandHandler) {}
}
