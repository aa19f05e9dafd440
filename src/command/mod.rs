mod actuate;
mod check_config;
mod daemon;
mod poll;
mod sleep_time;

pub use actuate::actuate;
pub use check_config::check_config;
pub use daemon::daemon;
pub use poll::poll;
pub use sleep_time::sleep_time;

use std::path::PathBuf;

use crate::helpers::{self, base_path};
use crate::interfaces::file_lock::NamedLock;
use crate::node_mgmt::config::ConfigStore;
use crate::readers::modbus_tcp::ModbusTcpClient;

fn sensors_store(path: Option<PathBuf>) -> ConfigStore {
    ConfigStore::new(
        path.unwrap_or_else(|| base_path::SENSORS_FILE.clone()),
        NamedLock::new(base_path::sensors_lock(), helpers::lock_timeout()),
    )
}

fn schedule_store(path: Option<PathBuf>) -> ConfigStore {
    ConfigStore::new(
        path.unwrap_or_else(|| base_path::SCHEDULE_FILE.clone()),
        NamedLock::new(base_path::schedule_lock(), helpers::lock_timeout()),
    )
}

fn modbus_client() -> ModbusTcpClient {
    ModbusTcpClient::new(
        NamedLock::new(base_path::modbus_lock(), helpers::lock_timeout()),
        helpers::modbus_timeout(),
    )
}
