use std::time::Duration;

pub const LOG_LEVEL: &str = "info";

pub const SENSORS_FILE: &str = "/usr/bin/sensors.json";
pub const SCHEDULE_FILE: &str = "schedule.json";
pub const CSV_FILE: &str = "/mnt/hdd/logs/sensor_readings.csv";
pub const CSV_FALLBACK_FILE: &str = "/tmp/sensor_readings.csv";
pub const LOCK_DIR: &str = "/tmp";

pub const SENSORS_LOCK_NAME: &str = "sensors_app.lock";
pub const SCHEDULE_LOCK_NAME: &str = "schedule_app.lock";
pub const MODBUS_LOCK_NAME: &str = "modbus_client.lock";

pub const LOCK_TIMEOUT: Duration = Duration::from_secs(30);
pub const MODBUS_TIMEOUT: Duration = Duration::from_secs(3);
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Sleep reported when the schedule cannot be loaded
pub const FALLBACK_SLEEP_SECS: u32 = 3600;
pub const MIN_SLEEP_SECS: u32 = 10;
/// Sleep reported for an empty schedule
pub const MAX_SLEEP_SECS: u32 = 24 * 3600;
