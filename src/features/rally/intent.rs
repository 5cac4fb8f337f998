//! Chat command to intent resolution.
//!
//! Pure classification, no side effects. The scheduler decides what each
//! intent means given the player's current state; this module only answers
//! "what did the player ask for".

use log::debug;

use crate::core::RallyConfig;

/// What a rally chat command asks the scheduler to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Arm a reminder: the rally flag was planted `cycle_position` seconds
    /// before the next spawn wave, notices land `lead_time` seconds early.
    Arm { cycle_position: u32, lead_time: u32 },
    /// Cancel the reminder and forget the player.
    Stop,
    /// Flip the mute state of a running reminder.
    TogglePause,
    /// A start command whose body could not be understood; the player
    /// should get the usage hint.
    Invalid,
}

/// Classify a command and its body against the configured alias families.
///
/// Returns `None` for commands outside all three families; those belong to
/// some other feature and must not produce a reply. Matching is
/// case-insensitive and whitespace-tolerant on both arguments.
pub fn resolve(config: &RallyConfig, command: &str, body: &str) -> Option<Intent> {
    let command = command.trim().to_lowercase();
    if config.is_stop_alias(&command) {
        return Some(Intent::Stop);
    }
    if config.is_pause_alias(&command) {
        return Some(Intent::TogglePause);
    }
    if !config.is_start_alias(&command) {
        return None;
    }

    let body = body.trim().to_lowercase();
    if body.is_empty() {
        return Some(Intent::Invalid);
    }
    // "!rally pause" works even where a dedicated pause alias would collide
    // with another plugin's command.
    if config.is_pause_alias(&body) {
        return Some(Intent::TogglePause);
    }

    let mut tokens = body.split_whitespace();
    let cycle_position = match tokens.next().and_then(|t| t.parse::<u32>().ok()) {
        Some(seconds) if seconds > 0 && seconds <= config.max_cycle_seconds() => seconds,
        _ => return Some(Intent::Invalid),
    };
    let lead_time = match tokens.next() {
        None => config.lead_time_default,
        Some(raw) => match raw.parse::<u32>() {
            Ok(seconds) if seconds > 0 && seconds <= config.lead_time_max => seconds,
            _ => {
                debug!(
                    "Lead time override {raw:?} out of range, using default {}",
                    config.lead_time_default
                );
                config.lead_time_default
            }
        },
    };

    Some(Intent::Arm {
        cycle_position,
        lead_time,
    })
}
