//! Rally reminder driver.
//!
//! Owns the per-player schedule table and the pause store, resolves inbound
//! chat commands to intents and turns them into timer and notice activity.
//! One instance serves every player on the server.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

use crate::commands::ChatCommandHandler;
use crate::core::{RallyConfig, RALLY_COMMAND};
use crate::notify::Notifier;

use super::delay::initial_delay;
use super::intent::{resolve, Intent};
use super::pause::PauseStore;
use super::registry::{SchedulePhase, TimerRegistry};

/// Gap between the two halves of the usage hint.
const USAGE_HINT_GAP: Duration = Duration::from_secs(6);

const STOPPED_NOTICE: &str = "Stopped sending rally reminders";
const NOT_RUNNING_NOTICE: &str = "You don't have an active rally reminder to stop.";
const PAUSED_NOTICE: &str = "Rally reminder PAUSED!\nTo resume, just use the command again.";
const RESUMED_NOTICE: &str = "Rally reminder RESUMED.";
const NO_REMINDER_NOTICE: &str = "You don't have an active rally reminder to pause or resume.";
const NOT_STARTED_NOTICE: &str =
    "Your rally reminder is still waiting for its first notice. It will arrive as scheduled.";

pub struct RallyScheduler {
    config: RallyConfig,
    registry: TimerRegistry,
    pause: Arc<PauseStore>,
    notifier: Arc<Notifier>,
}

impl RallyScheduler {
    pub fn new(config: RallyConfig, notifier: Arc<Notifier>, pause: Arc<PauseStore>) -> Self {
        Self {
            config,
            registry: TimerRegistry::new(),
            pause,
            notifier,
        }
    }

    /// Number of players with a live schedule.
    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    /// Install a schedule and confirm it to the player.
    ///
    /// A fresh arm always starts unmuted; whatever pause the player had on a
    /// previous schedule does not carry over.
    async fn arm(&self, player_id: &str, cycle_position: u32, lead_time: u32) {
        self.pause.clear(player_id);

        let delay = initial_delay(cycle_position, lead_time);
        let notice = tick_notice(&self.config, lead_time);
        let notifier = Arc::clone(&self.notifier);
        let player = player_id.to_string();
        self.registry.arm(player_id, lead_time, delay, move || {
            let notifier = Arc::clone(&notifier);
            let player = player.clone();
            let notice = notice.clone();
            async move {
                notifier.warn_unless_paused(&player, &notice).await;
            }
        });

        self.notifier
            .warn(player_id, &arm_confirmation(&self.config, lead_time))
            .await;
    }

    async fn stop(&self, player_id: &str) {
        let existed = self.registry.stop(player_id);
        self.pause.clear(player_id);
        let reply = if existed {
            STOPPED_NOTICE
        } else {
            NOT_RUNNING_NOTICE
        };
        self.notifier.warn(player_id, reply).await;
    }

    async fn toggle_pause(&self, player_id: &str) {
        match (self.registry.phase(player_id), self.pause.is_paused(player_id)) {
            (Some(_), true) => {
                self.pause.resume(player_id);
                info!("Rally reminder for {player_id} resumed");
                self.notifier.warn(player_id, RESUMED_NOTICE).await;
            }
            (Some(SchedulePhase::Repeating), false) => {
                self.pause.pause(player_id);
                info!("Rally reminder for {player_id} paused");
                self.notifier.warn(player_id, PAUSED_NOTICE).await;
            }
            (Some(SchedulePhase::Scheduled), false) => {
                // The first notice has not fired yet; nothing to mute.
                self.notifier.warn(player_id, NOT_STARTED_NOTICE).await;
            }
            (None, _) => {
                self.notifier.warn(player_id, NO_REMINDER_NOTICE).await;
            }
        }
    }

    /// Two messages, staggered so the second does not push the first off
    /// the screen before it can be read.
    async fn send_usage_hint(&self, player_id: &str) {
        self.notifier.warn(player_id, &usage_current_time(&self.config)).await;
        sleep(USAGE_HINT_GAP).await;
        self.notifier.warn(player_id, USAGE_CUSTOM_LEAD).await;
    }
}

#[async_trait]
impl ChatCommandHandler for RallyScheduler {
    fn command_names(&self) -> Vec<String> {
        self.config.command_names()
    }

    async fn handle_command(&self, player_id: &str, command: &str, body: &str) -> Result<()> {
        let request_id = Uuid::new_v4();
        match resolve(&self.config, command, body) {
            Some(Intent::Arm {
                cycle_position,
                lead_time,
            }) => {
                info!(
                    "[{request_id}] {player_id} armed a rally reminder: rally at {cycle_position}s, lead {lead_time}s"
                );
                self.arm(player_id, cycle_position, lead_time).await;
            }
            Some(Intent::Stop) => {
                info!("[{request_id}] {player_id} stopped their rally reminder");
                self.stop(player_id).await;
            }
            Some(Intent::TogglePause) => {
                info!("[{request_id}] {player_id} toggled their rally reminder");
                self.toggle_pause(player_id).await;
            }
            Some(Intent::Invalid) => {
                debug!("[{request_id}] Unusable rally command from {player_id}: {command:?} {body:?}");
                self.send_usage_hint(player_id).await;
            }
            None => {
                debug!("[{request_id}] Ignored non-rally command {command:?} from {player_id}");
            }
        }
        Ok(())
    }

    async fn on_round_ended(&self) {
        let cleared = self.registry.clear_all();
        self.pause.clear_all();
        if cleared > 0 {
            info!("Round ended, cleared {cleared} rally reminders");
        }
    }
}

const USAGE_CUSTOM_LEAD: &str =
    "Custom reminder time. For example:\n!rally 30 25\nThis will set a reminder 25 seconds before spawn.";

fn usage_current_time(config: &RallyConfig) -> String {
    format!(
        "Enter the CURRENT rally time (from 0 to {})\n\nFor example:\nTimer shows 30 seconds, then: !{RALLY_COMMAND} 30",
        config.max_cycle_seconds()
    )
}

/// The recurring notice; names one stop and one pause alias so the player
/// can act on it without looking anything up.
fn tick_notice(config: &RallyConfig, lead_time: u32) -> String {
    let stop = config.stop_aliases.first().map(String::as_str).unwrap_or("sr");
    let pause = config.pause_aliases.first().map(String::as_str).unwrap_or("pr");
    format!("Rally spawn in {lead_time} seconds! (!{stop} or !{pause})")
}

fn arm_confirmation(config: &RallyConfig, lead_time: u32) -> String {
    format!(
        "Get a reminder {lead_time} seconds before spawn at the rally.\nPAUSE with: {}\nSTOP with: {}",
        format_alias_list(&config.pause_aliases),
        format_alias_list(&config.stop_aliases)
    )
}

fn format_alias_list(aliases: &[String]) -> String {
    aliases
        .iter()
        .map(|alias| format!("!{alias}"))
        .collect::<Vec<_>>()
        .join(", ")
}
