//! One-shot personal timers.
//!
//! A player writes a free-text note with a minute count as the last word;
//! after that many minutes the note comes back as a reminder. Timers are
//! independent of each other and of the rally schedules; a player may hold
//! several at once.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use uuid::Uuid;

use crate::commands::ChatCommandHandler;
use crate::core::CountdownConfig;
use crate::notify::Notifier;

struct PendingTimer {
    timer_id: Uuid,
    handle: JoinHandle<()>,
}

pub struct CountdownTimer {
    config: CountdownConfig,
    notifier: Arc<Notifier>,
    pending: Arc<DashMap<String, Vec<PendingTimer>>>,
}

impl CountdownTimer {
    pub fn new(config: CountdownConfig, notifier: Arc<Notifier>) -> Self {
        Self {
            config,
            notifier,
            pending: Arc::new(DashMap::new()),
        }
    }

    /// Number of timers waiting to fire, across all players.
    pub fn pending_count(&self) -> usize {
        self.pending.iter().map(|entry| entry.value().len()).sum()
    }

    /// The minute count is the last whitespace token of the note.
    fn parse_minutes(&self, body: &str) -> Option<u32> {
        match body.split_whitespace().last().and_then(|t| t.parse::<u32>().ok()) {
            Some(minutes) if minutes > 0 && minutes <= self.config.max_minutes => Some(minutes),
            _ => None,
        }
    }

    async fn set_timer(&self, player_id: &str, minutes: u32, note: &str) {
        self.notifier
            .warn(
                player_id,
                &format!("In {minutes} minutes, we will remind you about: {note}"),
            )
            .await;

        let timer_id = Uuid::new_v4();
        let notifier = Arc::clone(&self.notifier);
        let pending = Arc::clone(&self.pending);
        let player = player_id.to_string();
        let reminder = format!("You asked to be reminded: {note}");
        let repeat = self.config.reminder_repeat;
        let deadline = Instant::now() + Duration::from_secs(u64::from(minutes) * 60);
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            notifier.warn_repeated(&player, &reminder, repeat).await;
            remove_pending(&pending, &player, timer_id);
        });

        self.pending
            .entry(player_id.to_string())
            .or_default()
            .push(PendingTimer { timer_id, handle });
        info!("Personal timer {timer_id} for {player_id} set to fire in {minutes}m");
    }

    async fn send_usage_hint(&self, player_id: &str) {
        let alias = self.config.aliases.first().map(String::as_str).unwrap_or("timer");
        self.notifier
            .warn(
                player_id,
                &format!(
                    "How many minutes should we set the timer for (from 0 to {})?\n\nWrite the time at the end of the command\nFor example: !{alias} mbt 30",
                    self.config.max_minutes
                ),
            )
            .await;
    }
}

#[async_trait]
impl ChatCommandHandler for CountdownTimer {
    fn command_names(&self) -> Vec<String> {
        self.config.aliases.clone()
    }

    async fn handle_command(&self, player_id: &str, command: &str, body: &str) -> Result<()> {
        let request_id = Uuid::new_v4();
        let note = body.trim();
        match self.parse_minutes(note) {
            Some(minutes) => {
                info!("[{request_id}] {player_id} set a personal timer: {minutes}m");
                self.set_timer(player_id, minutes, note).await;
            }
            None => {
                debug!("[{request_id}] Unusable timer command from {player_id}: {command:?} {body:?}");
                self.send_usage_hint(player_id).await;
            }
        }
        Ok(())
    }

    async fn on_round_ended(&self) {
        let mut cancelled = 0;
        self.pending.retain(|_, timers| {
            for timer in timers.iter() {
                timer.handle.abort();
            }
            cancelled += timers.len();
            false
        });
        if cancelled > 0 {
            info!("Round ended, cancelled {cancelled} personal timers");
        }
    }
}

/// Drop one fired timer from the tracker, and the player's slot when it was
/// the last one. The guard must be released before the slot removal or the
/// shard would deadlock against itself.
fn remove_pending(pending: &DashMap<String, Vec<PendingTimer>>, player_id: &str, timer_id: Uuid) {
    let now_empty = match pending.get_mut(player_id) {
        Some(mut entry) => {
            entry.retain(|t| t.timer_id != timer_id);
            entry.is_empty()
        }
        None => false,
    };
    if now_empty {
        pending.remove_if(player_id, |_, timers| timers.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NotifierConfig;
    use crate::features::rally::PauseStore;
    use crate::transport::NoticeTransport;
    use std::sync::Mutex;
    use tokio::task::yield_now;
    use tokio::time::advance;

    struct RecordingTransport {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingTransport {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NoticeTransport for RecordingTransport {
        async fn send_warn(&self, player_id: &str, text: &str) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((player_id.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn harness() -> (CountdownTimer, Arc<RecordingTransport>) {
        let transport = RecordingTransport::new();
        let notifier = Arc::new(Notifier::new(
            &NotifierConfig::default(),
            Arc::clone(&transport) as Arc<dyn NoticeTransport>,
            Arc::new(PauseStore::new()),
        ));
        (
            CountdownTimer::new(CountdownConfig::default(), notifier),
            transport,
        )
    }

    /// Move the paused clock forward and let woken tasks run.
    async fn advance_clock(duration: Duration) {
        advance(duration).await;
        yield_now().await;
        yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_confirms_and_fires_after_minutes() {
        let (countdown, transport) = harness();

        countdown.handle_command("p1", "timer", "mbt 5").await.unwrap();
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "In 5 minutes, we will remind you about: mbt 5");
        assert_eq!(countdown.pending_count(), 1);

        advance_clock(Duration::from_secs(299)).await;
        assert_eq!(transport.sent().len(), 1);

        // Reminder is delivered twice, the second with the dedup padding
        advance_clock(Duration::from_secs(1)).await;
        advance_clock(Duration::from_secs(5)).await;
        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].1, "You asked to be reminded: mbt 5");
        assert_eq!(sent[2].1, format!("You asked to be reminded: mbt 5{}", '\u{00A0}'));
        assert_eq!(countdown.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_note_is_echoed_verbatim() {
        let (countdown, transport) = harness();

        countdown
            .handle_command("p1", "timer", "  Tea AND Biscuits 7 ")
            .await
            .unwrap();

        let sent = transport.sent();
        assert_eq!(
            sent[0].1,
            "In 7 minutes, we will remind you about: Tea AND Biscuits 7"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unusable_bodies_get_usage_hint() {
        let (countdown, transport) = harness();

        for body in ["", "tea", "30 tea", "tea 0", "tea 31"] {
            countdown.handle_command("p1", "timer", body).await.unwrap();
        }

        let sent = transport.sent();
        assert_eq!(sent.len(), 5);
        for (_, text) in &sent {
            assert!(text.starts_with("How many minutes should we set the timer for (from 0 to 30)?"));
            assert!(text.contains("!timer mbt 30"));
        }
        assert_eq!(countdown.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_player_may_hold_several_timers() {
        let (countdown, transport) = harness();

        countdown.handle_command("p1", "timer", "first 5").await.unwrap();
        countdown.handle_command("p1", "timer", "second 10").await.unwrap();
        assert_eq!(countdown.pending_count(), 2);

        advance_clock(Duration::from_secs(300)).await;
        advance_clock(Duration::from_secs(5)).await;
        assert_eq!(countdown.pending_count(), 1);
        assert!(transport
            .sent()
            .iter()
            .any(|(_, text)| text == "You asked to be reminded: first 5"));

        advance_clock(Duration::from_secs(295)).await;
        advance_clock(Duration::from_secs(5)).await;
        assert_eq!(countdown.pending_count(), 0);
        assert!(transport
            .sent()
            .iter()
            .any(|(_, text)| text == "You asked to be reminded: second 10"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_end_cancels_pending_timers() {
        let (countdown, transport) = harness();

        countdown.handle_command("p1", "timer", "a 5").await.unwrap();
        countdown.handle_command("p2", "timer", "b 5").await.unwrap();
        assert_eq!(countdown.pending_count(), 2);

        countdown.on_round_ended().await;
        assert_eq!(countdown.pending_count(), 0);

        advance_clock(Duration::from_secs(400)).await;
        // Only the two confirmations ever went out
        assert_eq!(transport.sent().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_end_with_nothing_pending_is_quiet() {
        let (countdown, transport) = harness();
        countdown.on_round_ended().await;
        assert_eq!(countdown.pending_count(), 0);
        assert!(transport.sent().is_empty());
    }
}
