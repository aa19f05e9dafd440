//! Execution of scheduled actuator writes

use chrono::NaiveDateTime;

use super::models::ActuationSummary;
use super::schedule::due_events;
use super::CycleError;
use crate::node_mgmt::config::ConfigStore;
use crate::readers::modbus_tcp::{ProtocolError, RegisterClient};

/// Issue the writes for every event due at `now`
///
/// `now` is taken once by the caller so that the whole batch is resolved
/// against the same catch-up window.
pub fn run_actuation_cycle<C: RegisterClient>(
    store: &ConfigStore,
    client: &C,
    now: NaiveDateTime,
) -> Result<ActuationSummary, CycleError> {
    let events = store.load_schedule()?.items;
    let due = due_events(&events, now);

    let mut summary = ActuationSummary {
        due: due.len(),
        ..Default::default()
    };
    if due.is_empty() {
        log::info!("No events scheduled within the catch-up window");
        return Ok(summary);
    }
    log::info!("Found {} event(s) scheduled within the catch-up window", due.len());

    for event in &due {
        summary.attempted += 1;
        match client.write_single_register(&event.address, event.register_address, event.value) {
            Ok(()) => {
                log::info!(
                    "{} : {} : SET {} = {}",
                    event.label,
                    event.address,
                    event.register_address,
                    event.value
                );
                summary.succeeded += 1;
            }
            Err(ProtocolError::Lock(e)) => {
                log::error!("Aborting actuation cycle before '{}': {}", event.label, e);
                return Err(e.into());
            }
            Err(e) => log::warn!("Could not set '{}': {}", event.label, e),
        }
    }

    Ok(summary)
}
