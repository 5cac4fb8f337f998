//! Per-player schedule table.
//!
//! Each armed reminder is one spawned task driven by a 60-second interval
//! whose first tick lands at the computed initial delay. The table owns the
//! task handles exclusively; installing a schedule for a player always aborts
//! the previous one first, so a player never has two live timers.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::{debug, info};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;

use super::delay::CYCLE_SECONDS;

/// Where a schedule is in its life: waiting for the first notice, or ticking
/// every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulePhase {
    Scheduled,
    Repeating,
}

/// One live schedule. The handle is owned here exclusively.
struct ScheduleEntry {
    timer_id: Uuid,
    lead_time: u32,
    armed_at: DateTime<Utc>,
    /// Set by the task after its first tick; each arm gets its own flag, so
    /// a superseded task can never touch its replacement's entry.
    fired: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl ScheduleEntry {
    fn phase(&self) -> SchedulePhase {
        if self.fired.load(Ordering::SeqCst) {
            SchedulePhase::Repeating
        } else {
            SchedulePhase::Scheduled
        }
    }
}

/// Table of player id to live schedule, shared across tasks.
#[derive(Clone, Default)]
pub struct TimerRegistry {
    schedules: Arc<DashMap<String, ScheduleEntry>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a schedule for the player, replacing any existing one.
    ///
    /// The previous task is aborted before the new one is registered, so at
    /// no point do two timers for the same player run. `on_fire` is invoked
    /// once when `initial_delay` elapses and then on every 60-second tick
    /// until the schedule is stopped. Never blocks.
    pub fn arm<F, Fut>(&self, player_id: &str, lead_time: u32, initial_delay: Duration, on_fire: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let timer_id = Uuid::new_v4();
        let fired = Arc::new(AtomicBool::new(false));
        let task_fired = Arc::clone(&fired);

        if let Some((_, old)) = self.schedules.remove(player_id) {
            old.handle.abort();
            debug!(
                "Cancelled schedule {} for {player_id} before re-arm",
                old.timer_id
            );
        }

        let first_tick = Instant::now() + initial_delay;
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(first_tick, Duration::from_secs(CYCLE_SECONDS));
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                task_fired.store(true, Ordering::SeqCst);
                on_fire().await;
            }
        });

        let displaced = self.schedules.insert(
            player_id.to_string(),
            ScheduleEntry {
                timer_id,
                lead_time,
                armed_at: Utc::now(),
                fired,
                handle,
            },
        );
        debug_assert!(
            displaced.is_none(),
            "schedule slot for {player_id} was replaced without cancellation"
        );
        if let Some(stray) = displaced {
            stray.handle.abort();
        }

        info!(
            "Armed schedule {timer_id} for {player_id}: first notice in {}s, then every {CYCLE_SECONDS}s",
            initial_delay.as_secs()
        );
    }

    /// Cancel and remove the player's schedule.
    ///
    /// Returns whether a schedule existed. Once this returns, the cancelled
    /// task will not tick again.
    pub fn stop(&self, player_id: &str) -> bool {
        match self.schedules.remove(player_id) {
            Some((_, entry)) => {
                entry.handle.abort();
                info!(
                    "Stopped schedule {} for {player_id} (lead {}s, armed {})",
                    entry.timer_id, entry.lead_time, entry.armed_at
                );
                true
            }
            None => {
                debug!("Stop for {player_id} ignored, no schedule registered");
                false
            }
        }
    }

    /// Cancel and remove every schedule. Returns how many were live.
    pub fn clear_all(&self) -> usize {
        let mut cleared = 0;
        self.schedules.retain(|_, entry| {
            entry.handle.abort();
            cleared += 1;
            false
        });
        cleared
    }

    /// Phase of the player's schedule, if one is live.
    pub fn phase(&self, player_id: &str) -> Option<SchedulePhase> {
        self.schedules.get(player_id).map(|entry| entry.phase())
    }

    pub fn is_armed(&self, player_id: &str) -> bool {
        self.schedules.contains_key(player_id)
    }

    /// Number of live schedules.
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
