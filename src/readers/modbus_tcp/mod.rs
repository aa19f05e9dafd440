//! Modbus TCP access to field devices
//!
//! Every transaction, read or write, runs under one host-wide bus lock so that
//! no two processes ever talk to the slaves at the same time.

pub mod client;
pub mod defaults;

use thiserror::Error;

use crate::interfaces::file_lock::LockError;
use crate::node_mgmt::models::DeviceAddress;

pub use client::ModbusTcpClient;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("connection to {endpoint} failed: {reason}")]
    ConnectFailed { endpoint: String, reason: String },
    #[error("transaction with {endpoint} failed: {reason}")]
    TransactionError { endpoint: String, reason: String },
    #[error("Modbus bus lock unavailable: {0}")]
    Lock(#[from] LockError),
}

/// Single-register reads and writes against one device per call
pub trait RegisterClient {
    /// Function 0x03 from register 0 for `count` registers
    fn read_holding_registers(
        &self,
        device: &DeviceAddress,
        count: u16,
    ) -> Result<Vec<u16>, ProtocolError>;

    /// Function 0x06 at `register`
    fn write_single_register(
        &self,
        device: &DeviceAddress,
        register: u16,
        value: u16,
    ) -> Result<(), ProtocolError>;
}
