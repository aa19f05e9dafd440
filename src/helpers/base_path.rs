use std::{env, path::PathBuf};

use once_cell::sync::Lazy;

use crate::constants::{defaults, envvars};

fn path_from_env(var: &str, default: &str) -> PathBuf {
    env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

pub static SENSORS_FILE: Lazy<PathBuf> =
    Lazy::new(|| path_from_env(envvars::SENSORS_FILE, defaults::SENSORS_FILE));

pub static SCHEDULE_FILE: Lazy<PathBuf> =
    Lazy::new(|| path_from_env(envvars::SCHEDULE_FILE, defaults::SCHEDULE_FILE));

pub static CSV_FILE: Lazy<PathBuf> =
    Lazy::new(|| path_from_env(envvars::CSV_FILE, defaults::CSV_FILE));

pub static CSV_FALLBACK_FILE: Lazy<PathBuf> =
    Lazy::new(|| path_from_env(envvars::CSV_FALLBACK_FILE, defaults::CSV_FALLBACK_FILE));

pub static LOCK_DIR: Lazy<PathBuf> =
    Lazy::new(|| path_from_env(envvars::LOCK_DIR, defaults::LOCK_DIR));

pub fn sensors_lock() -> PathBuf {
    LOCK_DIR.join(defaults::SENSORS_LOCK_NAME)
}

pub fn schedule_lock() -> PathBuf {
    LOCK_DIR.join(defaults::SCHEDULE_LOCK_NAME)
}

pub fn modbus_lock() -> PathBuf {
    LOCK_DIR.join(defaults::MODBUS_LOCK_NAME)
}
