//! Time-of-day schedule resolution
//!
//! Invocations are driven by an external timer that does not fire exactly on
//! minute boundaries, so an event counts as due during its own minute and the
//! minute after it. Running the actuation cycle twice inside that window
//! executes the event twice; there is no persisted "already done" marker.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::constants::defaults::{MAX_SLEEP_SECS, MIN_SLEEP_SECS};
use crate::node_mgmt::models::ScheduleEvent;

/// (hour, minute) pairs making up the catch-up window ending at `now`
fn catch_up_window(now: NaiveDateTime) -> [(u32, u32); 2] {
    let previous = now - Duration::minutes(1);
    [
        (now.hour(), now.minute()),
        (previous.hour(), previous.minute()),
    ]
}

/// Events whose start minute is the current or the previous minute, in source order
pub fn due_events(events: &[ScheduleEvent], now: NaiveDateTime) -> Vec<ScheduleEvent> {
    let window = catch_up_window(now);
    events
        .iter()
        .filter(|event| window.contains(&(event.start_time.hour(), event.start_time.minute())))
        .cloned()
        .collect()
}

/// Next occurrence of the event strictly after `now`
fn next_occurrence(event: &ScheduleEvent, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date().and_time(event.start_time);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Seconds to sleep until the nearest upcoming event
///
/// Never less than [`MIN_SLEEP_SECS`]; a full day when there are no events.
pub fn next_sleep_seconds(events: &[ScheduleEvent], now: NaiveDateTime) -> u32 {
    events
        .iter()
        .map(|event| (next_occurrence(event, now) - now).num_seconds())
        .min()
        .map(|secs| secs.clamp(MIN_SLEEP_SECS as i64, MAX_SLEEP_SECS as i64) as u32)
        .unwrap_or(MAX_SLEEP_SECS)
}
