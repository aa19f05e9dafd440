use std::env;
use std::time::Duration;

use crate::constants::{defaults, envvars};

/// Read a whole number of seconds from `var`, falling back to `default`
/// when unset or unparseable
pub fn duration_secs_from_env(var: &str, default: Duration) -> Duration {
    match env::var(var) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                log::warn!(
                    "Ignoring invalid value '{}' for {}; using {}s",
                    raw,
                    var,
                    default.as_secs()
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn lock_timeout() -> Duration {
    duration_secs_from_env(envvars::LOCK_TIMEOUT_SECS, defaults::LOCK_TIMEOUT)
}

pub fn modbus_timeout() -> Duration {
    duration_secs_from_env(envvars::MODBUS_TIMEOUT_SECS, defaults::MODBUS_TIMEOUT)
}

pub fn poll_interval() -> Duration {
    duration_secs_from_env(envvars::POLL_INTERVAL_SECS, defaults::POLL_INTERVAL)
}
