pub mod config;
pub mod models;

pub use config::{ConfigEntryError, ConfigError, ConfigStore, Loaded};
