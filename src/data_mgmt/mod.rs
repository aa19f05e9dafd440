pub mod actuation;
pub mod models;
pub mod output;
pub mod polling;
pub mod schedule;

use thiserror::Error;

use crate::interfaces::file_lock::LockError;
use crate::node_mgmt::config::ConfigError;
use output::OutputError;

pub use actuation::run_actuation_cycle;
pub use polling::run_polling_cycle;

/// Failure that ends a cycle early; per-device errors never become one
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
