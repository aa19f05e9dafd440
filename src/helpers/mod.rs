mod env_settings;
mod load_dotenv;
mod time;

pub use env_settings::{duration_secs_from_env, lock_timeout, modbus_timeout, poll_interval};
pub use load_dotenv::load_dotenv;
pub use time::{format_timestamp, now_local, TIMESTAMP_FORMAT};

pub mod base_path;
