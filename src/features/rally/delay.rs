//! Initial-delay arithmetic for the rally spawn cycle.
//!
//! Rally points spawn on a fixed 60-second cycle. A player arming a reminder
//! reports how many seconds remain until the next spawn; the first notice has
//! to land `lead_time` seconds before a spawn, which can mean waiting into
//! the following cycle.

use std::time::Duration;

/// Length of the rally spawn cycle in seconds.
pub const CYCLE_SECONDS: u64 = 60;

/// Computes how long to wait before the first notice.
///
/// `cycle_position` is the player-reported seconds until the next spawn,
/// `lead_time` how far ahead of a spawn the notice should land. When the
/// lead time overshoots the upcoming spawn, the first notice aligns to the
/// spawn after it. A lead time longer than a full cycle can push the result
/// negative; that clamps to zero and the notice fires immediately.
pub fn initial_delay(cycle_position: u32, lead_time: u32) -> Duration {
    let cycle_position = i64::from(cycle_position);
    let lead_time = i64::from(lead_time);

    let seconds = if cycle_position > lead_time {
        cycle_position - lead_time
    } else {
        CYCLE_SECONDS as i64 - lead_time + cycle_position
    };

    Duration::from_secs(seconds.max(0) as u64)
}
