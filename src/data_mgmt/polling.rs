//! One pass over the sensor inventory

use super::models::{PollSummary, Reading};
use super::output::{OutputError, ReadingSink};
use super::CycleError;
use crate::helpers::now_local;
use crate::node_mgmt::config::ConfigStore;
use crate::readers::modbus_tcp::{ProtocolError, RegisterClient};

/// Read every sensor once, in inventory order, appending each reading to the sink
///
/// The sink is opened only after the inventory has loaded. A device that
/// cannot be read is logged and skipped; losing the bus lock ends the cycle.
pub fn run_polling_cycle<C, S, F>(
    store: &ConfigStore,
    client: &C,
    open_sink: F,
) -> Result<PollSummary, CycleError>
where
    C: RegisterClient,
    S: ReadingSink,
    F: FnOnce() -> Result<S, OutputError>,
{
    let sensors = store.load_sensors()?.items;
    log::info!("Polling {} sensor(s)", sensors.len());

    let mut sink = open_sink()?;
    let mut summary = PollSummary::default();

    for sensor in &sensors {
        summary.polled += 1;
        match client.read_holding_registers(&sensor.address, sensor.register_count) {
            Ok(values) => {
                log::info!("{} : {} : {:?}", sensor.label, sensor.address, values);
                let reading = Reading::from_sensor(sensor, now_local(), values);
                sink.append(&reading)?;
                summary.logged += 1;
            }
            Err(ProtocolError::Lock(e)) => {
                log::error!(
                    "Aborting polling cycle before '{}': {}",
                    sensor.label,
                    e
                );
                return Err(e.into());
            }
            Err(e) => {
                log::warn!("Could not retrieve data for '{}': {}", sensor.label, e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
