pub const SENSORS_FILE: &str = "MBS_SENSORS_FILE";
pub const SCHEDULE_FILE: &str = "MBS_SCHEDULE_FILE";
pub const CSV_FILE: &str = "MBS_CSV_FILE";
pub const CSV_FALLBACK_FILE: &str = "MBS_CSV_FALLBACK_FILE";
pub const LOCK_DIR: &str = "MBS_LOCK_DIR";

pub const LOCK_TIMEOUT_SECS: &str = "MBS_LOCK_TIMEOUT_SECS";
pub const MODBUS_TIMEOUT_SECS: &str = "MBS_MODBUS_TIMEOUT_SECS";
pub const POLL_INTERVAL_SECS: &str = "MBS_POLL_INTERVAL_SECS";

pub const LOG_LEVEL: &str = "LOG_LEVEL";
