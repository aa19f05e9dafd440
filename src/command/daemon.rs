use std::thread;
use std::time::Duration;

use anyhow::Result;

use super::actuate::actuate_once;
use super::poll::poll_once;
use super::sleep_time::sleep_seconds_for;
use crate::argsets::DaemonArgs;
use crate::helpers::{self, now_local};

/// Run actuation and polling cycles from one long-lived process
///
/// Each iteration rereads both files and takes the locks afresh, exactly as
/// separate invocations would; nothing is carried over between iterations.
pub fn daemon(args: DaemonArgs) -> Result<()> {
    let schedule_store = super::schedule_store(args.schedule_file);
    let sensors_store = super::sensors_store(args.sensors_file);
    let client = super::modbus_client();
    let poll_interval = args
        .poll_interval
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(helpers::poll_interval);

    log::info!(
        "Starting daemon with schedule {}, sensors {}, poll interval {}s",
        schedule_store.path().display(),
        sensors_store.path().display(),
        poll_interval.as_secs()
    );

    loop {
        actuate_once(&schedule_store, &client, now_local());
        poll_once(&sensors_store, &client, args.csv_file.as_deref());

        let until_next_event =
            Duration::from_secs(sleep_seconds_for(&schedule_store, now_local()).into());
        let sleep = until_next_event.min(poll_interval);
        log::debug!("Sleeping {}s", sleep.as_secs());
        thread::sleep(sleep);
    }
}
