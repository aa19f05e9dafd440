use std::fmt;

use chrono::NaiveTime;
use serde::Deserialize;

/// Largest register count a single Read Holding Registers request may ask for
pub const MAX_READ_REGISTERS: u16 = 125;

const START_TIME_FORMAT: &str = "%H:%M";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    Sensor,
    Actuator,
}

impl DeviceKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "sensor" => Some(DeviceKind::Sensor),
            "actuator" => Some(DeviceKind::Actuator),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeviceAddress {
    pub ip: String,
    pub port: u16,
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SensorDevice {
    pub label: String,
    pub address: DeviceAddress,
    pub register_count: u16,
}

/// One scheduled write, as stored in the schedule file
///
/// The schedule file repeats label/address/register for every event, so the
/// resolver and wake scheduler work on this flattened form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleEvent {
    pub label: String,
    pub address: DeviceAddress,
    pub register_address: u16,
    pub value: u16,
    pub start_time: NaiveTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub start_time: NaiveTime,
    pub value: u16,
}

/// Per-device view of the schedule
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActuatorDevice {
    pub label: String,
    pub address: DeviceAddress,
    pub register_address: u16,
    pub schedule: Vec<ScheduleEntry>,
}

/// Group flattened events back into actuators, keeping first-seen order
pub fn group_actuators(events: &[ScheduleEvent]) -> Vec<ActuatorDevice> {
    let mut actuators: Vec<ActuatorDevice> = Vec::new();
    for event in events {
        let entry = ScheduleEntry {
            start_time: event.start_time,
            value: event.value,
        };
        let existing = actuators.iter_mut().find(|a| {
            a.label == event.label
                && a.address == event.address
                && a.register_address == event.register_address
        });
        match existing {
            Some(actuator) => actuator.schedule.push(entry),
            None => actuators.push(ActuatorDevice {
                label: event.label.clone(),
                address: event.address.clone(),
                register_address: event.register_address,
                schedule: vec![entry],
            }),
        }
    }
    actuators
}

/// Raw record as it appears in the JSON files; every key is optional so that
/// one bad entry can be reported without rejecting the whole file
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawRecord {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub ip: Option<String>,
    pub port: Option<i64>,
    pub length: Option<i64>,
    pub register_address: Option<i64>,
    pub valor: Option<i64>,
    pub value: Option<i64>,
    pub start_time: Option<String>,
}

impl RawRecord {
    pub fn kind(&self) -> Result<Option<DeviceKind>, String> {
        match self.kind.as_deref() {
            None => Ok(None),
            Some(raw) => DeviceKind::parse(raw)
                .map(Some)
                .ok_or_else(|| format!("unknown device type '{}'", raw)),
        }
    }

    fn address(&self) -> Result<DeviceAddress, String> {
        let ip = require(&self.ip, "ip")?;
        if ip.trim().is_empty() {
            return Err("empty 'ip'".into());
        }
        let port = *require(&self.port, "port")?;
        let port = u16::try_from(port)
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| format!("port {} outside 1-65535", port))?;
        Ok(DeviceAddress {
            ip: ip.clone(),
            port,
        })
    }

    pub fn into_sensor(self) -> Result<SensorDevice, String> {
        let address = self.address()?;
        let length = *require(&self.length, "length")?;
        let register_count = u16::try_from(length)
            .ok()
            .filter(|n| (1..=MAX_READ_REGISTERS).contains(n))
            .ok_or_else(|| format!("length {} outside 1-{}", length, MAX_READ_REGISTERS))?;
        Ok(SensorDevice {
            label: require(&self.label, "label")?.clone(),
            address,
            register_count,
        })
    }

    /// `valor`, or its older spelling `value`; giving both is ambiguous
    fn written_value(&self) -> Result<i64, String> {
        match (self.valor, self.value) {
            (Some(_), Some(_)) => Err("both 'valor' and 'value' given".into()),
            (Some(v), None) | (None, Some(v)) => Ok(v),
            (None, None) => Err("missing 'valor'".into()),
        }
    }

    pub fn into_schedule_event(self) -> Result<ScheduleEvent, String> {
        let address = self.address()?;
        let register_address = register_word(
            *require(&self.register_address, "register_address")?,
            "register_address",
        )?;
        let value = register_word(self.written_value()?, "valor")?;
        let raw_time = require(&self.start_time, "start_time")?;
        let start_time = NaiveTime::parse_from_str(raw_time.trim(), START_TIME_FORMAT)
            .map_err(|e| format!("invalid start_time '{}': {}", raw_time, e))?;
        Ok(ScheduleEvent {
            label: require(&self.label, "label")?.clone(),
            address,
            register_address,
            value,
            start_time,
        })
    }
}

fn require<'a, T>(field: &'a Option<T>, name: &str) -> Result<&'a T, String> {
    field.as_ref().ok_or_else(|| format!("missing '{}'", name))
}

fn register_word(raw: i64, name: &str) -> Result<u16, String> {
    u16::try_from(raw).map_err(|_| format!("{} {} outside 0-65535", name, raw))
}
