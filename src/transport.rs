//! Outbound notice delivery seam
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial trait extracted from the RCON wiring

use anyhow::Result;
use async_trait::async_trait;

/// Private-message channel supplied by the hosting server integration
///
/// Implementations deliver `text` to the single player identified by
/// `player_id`; the reminder features never broadcast. In production this is
/// an RCON warn channel; tests use in-memory recorders.
///
/// # Example
///
/// ```ignore
/// pub struct RconTransport {
///     rcon: RconClient,
/// }
///
/// #[async_trait]
/// impl NoticeTransport for RconTransport {
///     async fn send_warn(&self, player_id: &str, text: &str) -> Result<()> {
///         self.rcon.warn(player_id, text).await
///     }
/// }
/// ```
#[async_trait]
pub trait NoticeTransport: Send + Sync {
    /// Deliver one private notice to one player
    ///
    /// Errors are the transport's own; callers log and move on, they never
    /// retry a single delivery.
    async fn send_warn(&self, player_id: &str, text: &str) -> Result<()>;
}
