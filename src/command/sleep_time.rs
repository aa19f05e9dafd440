use anyhow::Result;
use chrono::NaiveDateTime;

use crate::argsets::SleepTimeArgs;
use crate::constants::defaults;
use crate::data_mgmt::schedule::next_sleep_seconds;
use crate::helpers::now_local;
use crate::node_mgmt::config::ConfigStore;

/// Print the number of seconds the external timer should sleep
///
/// Always succeeds: an unreadable schedule yields the fallback interval so
/// the caller never busy-loops.
pub fn sleep_time(args: SleepTimeArgs) -> Result<()> {
    let store = super::schedule_store(args.schedule_file);
    println!("{}", sleep_seconds_for(&store, now_local()));
    Ok(())
}

pub(super) fn sleep_seconds_for(store: &ConfigStore, now: NaiveDateTime) -> u32 {
    match store.load_schedule() {
        Ok(loaded) => next_sleep_seconds(&loaded.items, now),
        Err(e) => {
            log::warn!(
                "{}; sleeping the default {}s",
                e,
                defaults::FALLBACK_SLEEP_SECS
            );
            defaults::FALLBACK_SLEEP_SECS
        }
    }
}
