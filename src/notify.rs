//! Notice delivery shared by every reminder feature.
//!
//! Wraps the raw transport with the two delivery behaviours the features
//! need: spaced repeats for notices that must not be missed, and a per-send
//! mute check for the recurring rally notices. Delivery failures are logged
//! and swallowed; a dropped notice must never take a timer task down.

use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::core::NotifierConfig;
use crate::features::rally::PauseStore;
use crate::transport::NoticeTransport;

/// Appended to repeated sends so identical texts stay distinct. Some game
/// servers collapse a message that matches the previous one; a non-breaking
/// space is invisible in the on-screen rendering.
const PADDING: char = '\u{00A0}';

#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn NoticeTransport>,
    pause: Arc<PauseStore>,
    spacing: Duration,
    repeat: u32,
}

impl Notifier {
    pub fn new(
        config: &NotifierConfig,
        transport: Arc<dyn NoticeTransport>,
        pause: Arc<PauseStore>,
    ) -> Self {
        Self {
            transport,
            pause,
            spacing: Duration::from_secs(config.spacing_seconds),
            repeat: config.repeat_count,
        }
    }

    /// Deliver a notice once, regardless of the player's mute state.
    ///
    /// Used for direct command replies; a player who paused their reminder
    /// still gets confirmations and usage hints.
    pub async fn warn(&self, player_id: &str, text: &str) {
        self.warn_repeated(player_id, text, 1).await;
    }

    /// Deliver a notice `repeat` times, spaced by the configured gap.
    pub async fn warn_repeated(&self, player_id: &str, text: &str, repeat: u32) {
        for attempt in 0..repeat {
            if attempt > 0 {
                sleep(self.spacing).await;
            }
            self.attempt(player_id, &padded(text, attempt)).await;
        }
    }

    /// Deliver a scheduled notice the configured number of times, honouring
    /// the player's mute.
    ///
    /// The mute flag is re-read before every send, so pausing in the middle
    /// of a burst stops the remaining repeats.
    pub async fn warn_unless_paused(&self, player_id: &str, text: &str) {
        for attempt in 0..self.repeat {
            if attempt > 0 {
                sleep(self.spacing).await;
            }
            if self.pause.is_paused(player_id) {
                debug!("Notice to {player_id} muted while paused");
                return;
            }
            self.attempt(player_id, &padded(text, attempt)).await;
        }
    }

    async fn attempt(&self, player_id: &str, text: &str) {
        if let Err(e) = self.transport.send_warn(player_id, text).await {
            warn!("Failed to deliver notice to {player_id}: {e:#}");
        }
    }
}

/// Text for the given repeat attempt; attempt 0 is the original.
fn padded(text: &str, attempt: u32) -> String {
    let mut out = String::with_capacity(text.len() + attempt as usize);
    out.push_str(text);
    for _ in 0..attempt {
        out.push(PADDING);
    }
    out
}
