use chrono::NaiveDateTime;

use crate::node_mgmt::models::{DeviceAddress, SensorDevice};

/// Registers read from one sensor in one polling cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub label: String,
    pub address: DeviceAddress,
    pub register_count: u16,
    pub values: Vec<u16>,
}

impl Reading {
    pub fn from_sensor(sensor: &SensorDevice, timestamp: NaiveDateTime, values: Vec<u16>) -> Self {
        Self {
            timestamp,
            label: sensor.label.clone(),
            address: sensor.address.clone(),
            register_count: sensor.register_count,
            values,
        }
    }

    /// Register list as written to the log, e.g. `[42, 7]`
    pub fn values_text(&self) -> String {
        format!("{:?}", self.values)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub polled: usize,
    pub logged: usize,
    pub failed: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActuationSummary {
    pub due: usize,
    pub attempted: usize,
    pub succeeded: usize,
}
