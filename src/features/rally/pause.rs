//! Pause bookkeeping for active rally reminders.
//!
//! Pausing never touches the underlying schedule; the tick keeps running and
//! the delivery path checks this set before sending.

use dashmap::DashSet;

/// Set of players whose active reminder is currently muted.
#[derive(Default)]
pub struct PauseStore {
    paused: DashSet<String>,
}

impl PauseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute the player's reminder.
    pub fn pause(&self, player_id: &str) {
        self.paused.insert(player_id.to_string());
    }

    /// Unmute the player's reminder.
    pub fn resume(&self, player_id: &str) {
        self.paused.remove(player_id);
    }

    pub fn is_paused(&self, player_id: &str) -> bool {
        self.paused.contains(player_id)
    }

    /// Drop the player's pause flag during schedule teardown.
    pub fn clear(&self, player_id: &str) {
        self.paused.remove(player_id);
    }

    /// Drop every pause flag.
    pub fn clear_all(&self) {
        self.paused.clear();
    }

    /// Number of muted players.
    pub fn len(&self) -> usize {
        self.paused.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paused.is_empty()
    }
}
