use anyhow::Result;
use chrono::NaiveDateTime;

use crate::argsets::ActuateArgs;
use crate::data_mgmt::run_actuation_cycle;
use crate::helpers::now_local;
use crate::node_mgmt::config::ConfigStore;
use crate::readers::modbus_tcp::RegisterClient;

/// Run one actuation cycle against the current minute
pub fn actuate(args: ActuateArgs) -> Result<()> {
    let store = super::schedule_store(args.schedule_file);
    let client = super::modbus_client();
    actuate_once(&store, &client, now_local());
    Ok(())
}

pub(super) fn actuate_once<C: RegisterClient>(store: &ConfigStore, client: &C, now: NaiveDateTime) {
    match run_actuation_cycle(store, client, now) {
        Ok(summary) => log::info!(
            "Actuation cycle finished: {} of {} command(s) succeeded",
            summary.succeeded,
            summary.attempted
        ),
        Err(e) => log::error!("Actuation cycle aborted: {}", e),
    }
}
