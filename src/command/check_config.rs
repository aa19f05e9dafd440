use anyhow::{anyhow, Result};

use crate::argsets::{CheckConfigArgs, ConfigKind};
use crate::node_mgmt::models::group_actuators;

/// Validate a sensors or schedule file and print what would be used from it
pub fn check_config(args: CheckConfigArgs) -> Result<()> {
    let rejected = match args.kind {
        ConfigKind::Sensors => {
            let loaded = super::sensors_store(Some(args.file.clone())).load_sensors()?;
            println!("{} sensor(s)", loaded.items.len());
            for sensor in &loaded.items {
                println!(
                    "  {} at {}: {} register(s)",
                    sensor.label, sensor.address, sensor.register_count
                );
            }
            loaded.rejected
        }
        ConfigKind::Schedule => {
            let loaded = super::schedule_store(Some(args.file.clone())).load_schedule()?;
            let actuators = group_actuators(&loaded.items);
            println!(
                "{} event(s) for {} actuator(s)",
                loaded.items.len(),
                actuators.len()
            );
            for actuator in &actuators {
                let entries: Vec<String> = actuator
                    .schedule
                    .iter()
                    .map(|e| format!("{}={}", e.start_time.format("%H:%M"), e.value))
                    .collect();
                println!(
                    "  {} at {} register {}: {}",
                    actuator.label,
                    actuator.address,
                    actuator.register_address,
                    entries.join(", ")
                );
            }
            loaded.rejected
        }
    };

    if rejected.is_empty() {
        Ok(())
    } else {
        for entry in &rejected {
            println!("  rejected {}", entry);
        }
        Err(anyhow!(
            "{} invalid entr{} in {}",
            rejected.len(),
            if rejected.len() == 1 { "y" } else { "ies" },
            args.file.display()
        ))
    }
}
