use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use tokio_modbus::client::sync::{self, Context};
use tokio_modbus::prelude::{Slave, SyncReader, SyncWriter};

use super::defaults;
use super::{ProtocolError, RegisterClient};
use crate::interfaces::file_lock::NamedLock;
use crate::node_mgmt::models::DeviceAddress;

/// ModbusTCP client that opens a fresh connection for every transaction
#[derive(Clone, Debug)]
pub struct ModbusTcpClient {
    bus_lock: NamedLock,
    timeout: Duration,
    unit_id: u8,
}

impl ModbusTcpClient {
    pub fn new(bus_lock: NamedLock, timeout: Duration) -> Self {
        Self {
            bus_lock,
            timeout,
            unit_id: defaults::UNIT_ID,
        }
    }

    /// Connect, run one request and disconnect, all while holding the bus lock
    fn transact<T, F>(&self, device: &DeviceAddress, request: F) -> Result<T, ProtocolError>
    where
        F: FnOnce(&mut Context) -> tokio_modbus::Result<T>,
    {
        let _bus_guard = self.bus_lock.acquire()?;

        let socket_addr = resolve(device)?;
        log::debug!(
            "Connecting to ModbusTCP device at {}/{}",
            socket_addr,
            self.unit_id
        );
        let mut ctx = sync::tcp::connect_slave_with_timeout(
            socket_addr,
            Slave(self.unit_id),
            Some(self.timeout),
        )
        .map_err(|e| ProtocolError::ConnectFailed {
            endpoint: device.to_string(),
            reason: e.to_string(),
        })?;
        ctx.set_timeout(Some(self.timeout));

        let result = request(&mut ctx);
        // Closes the TCP connection before the bus lock is released
        drop(ctx);

        match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(exception)) => Err(ProtocolError::TransactionError {
                endpoint: device.to_string(),
                reason: format!("Modbus exception: {}", exception),
            }),
            Err(e) => Err(ProtocolError::TransactionError {
                endpoint: device.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl RegisterClient for ModbusTcpClient {
    fn read_holding_registers(
        &self,
        device: &DeviceAddress,
        count: u16,
    ) -> Result<Vec<u16>, ProtocolError> {
        log::debug!(
            "Reading {} holding registers from {} starting at {}",
            count,
            device,
            defaults::READ_START_REGISTER
        );
        let registers = self.transact(device, |ctx| {
            ctx.read_holding_registers(defaults::READ_START_REGISTER, count)
        })?;

        if registers.len() != usize::from(count) {
            return Err(ProtocolError::TransactionError {
                endpoint: device.to_string(),
                reason: format!(
                    "expected {} registers, device returned {}",
                    count,
                    registers.len()
                ),
            });
        }
        Ok(registers)
    }

    fn write_single_register(
        &self,
        device: &DeviceAddress,
        register: u16,
        value: u16,
    ) -> Result<(), ProtocolError> {
        log::debug!("Writing {} to register {} on {}", value, register, device);
        self.transact(device, |ctx| ctx.write_single_register(register, value))
    }
}

fn resolve(device: &DeviceAddress) -> Result<SocketAddr, ProtocolError> {
    (device.ip.as_str(), device.port)
        .to_socket_addrs()
        .map_err(|e| e.to_string())
        .and_then(|mut addrs| {
            addrs
                .next()
                .ok_or_else(|| format!("failed to resolve hostname: {}", device.ip))
        })
        .map_err(|reason| ProtocolError::ConnectFailed {
            endpoint: device.to_string(),
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Instant;

    use crate::interfaces::file_lock::LockError;

    fn closed_local_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    fn client_with_timeout(dir: &tempfile::TempDir, timeout: Duration) -> ModbusTcpClient {
        ModbusTcpClient::new(
            NamedLock::new(dir.path().join("modbus_client.lock"), Duration::from_millis(200)),
            timeout,
        )
    }

    fn client_in(dir: &tempfile::TempDir) -> ModbusTcpClient {
        client_with_timeout(dir, Duration::from_secs(2))
    }

    fn local_device(port: u16) -> DeviceAddress {
        DeviceAddress {
            ip: "127.0.0.1".into(),
            port,
        }
    }

    /// Single-request Modbus TCP slave on a local port
    ///
    /// The thread yields the unit id + PDU it received. `respond` builds the
    /// reply body (unit id + PDU); `None` keeps the connection open without
    /// answering until the client hangs up.
    fn spawn_slave<F>(respond: F) -> (u16, JoinHandle<Vec<u8>>)
    where
        F: FnOnce(&[u8]) -> Option<Vec<u8>> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut header = [0u8; 6];
            stream.read_exact(&mut header).unwrap();
            let mut body = vec![0u8; usize::from(u16::from_be_bytes([header[4], header[5]]))];
            stream.read_exact(&mut body).unwrap();

            match respond(&body) {
                Some(reply) => {
                    let mut frame = header[..4].to_vec();
                    frame.extend_from_slice(&(reply.len() as u16).to_be_bytes());
                    frame.extend_from_slice(&reply);
                    stream.write_all(&frame).unwrap();
                }
                None => {
                    let mut rest = Vec::new();
                    let _ = stream.read_to_end(&mut rest);
                }
            }
            body
        });
        (port, handle)
    }

    #[test]
    fn test_read_holding_registers_from_slave() {
        let dir = tempfile::tempdir().unwrap();
        let (port, slave) = spawn_slave(|_| Some(vec![1, 0x03, 4, 0, 42, 0, 7]));

        let values = client_in(&dir)
            .read_holding_registers(&local_device(port), 2)
            .unwrap();

        assert_eq!(values, vec![42, 7]);
        // unit 1, function 0x03, start register 0, quantity 2
        assert_eq!(slave.join().unwrap(), vec![1, 0x03, 0, 0, 0, 2]);
    }

    #[test]
    fn test_write_single_register_to_slave() {
        let dir = tempfile::tempdir().unwrap();
        let (port, slave) = spawn_slave(|request| Some(request.to_vec()));

        client_in(&dir)
            .write_single_register(&local_device(port), 10, 513)
            .unwrap();

        // unit 1, function 0x06, register 10, value 0x0201
        assert_eq!(slave.join().unwrap(), vec![1, 0x06, 0, 10, 2, 1]);
    }

    #[test]
    fn test_exception_response_is_transaction_error() {
        let dir = tempfile::tempdir().unwrap();
        // Illegal data address
        let (port, slave) = spawn_slave(|_| Some(vec![1, 0x83, 0x02]));

        let result = client_in(&dir).read_holding_registers(&local_device(port), 1);

        assert!(matches!(result, Err(ProtocolError::TransactionError { .. })));
        slave.join().unwrap();
    }

    #[test]
    fn test_silent_slave_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let (port, slave) = spawn_slave(|_| None);
        let client = client_with_timeout(&dir, Duration::from_secs(1));

        let started = Instant::now();
        let result = client.read_holding_registers(&local_device(port), 1);
        let waited = started.elapsed();

        assert!(matches!(result, Err(ProtocolError::TransactionError { .. })));
        assert!(waited >= Duration::from_millis(900), "{:?}", waited);
        assert!(waited < Duration::from_secs(10), "{:?}", waited);
        slave.join().unwrap();
    }

    #[test]
    fn test_read_from_closed_port_is_connect_failure() {
        let dir = tempfile::tempdir().unwrap();
        let device = DeviceAddress {
            ip: "127.0.0.1".into(),
            port: closed_local_port(),
        };
        match client_in(&dir).read_holding_registers(&device, 1) {
            Err(ProtocolError::ConnectFailed { endpoint, .. }) => {
                assert_eq!(endpoint, device.to_string());
            }
            other => panic!("expected connect failure, got {:?}", other),
        }
    }

    #[test]
    fn test_bus_lock_released_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_in(&dir);
        let device = DeviceAddress {
            ip: "127.0.0.1".into(),
            port: closed_local_port(),
        };
        assert!(client.write_single_register(&device, 10, 1).is_err());

        let bus_lock = NamedLock::new(dir.path().join("modbus_client.lock"), Duration::from_millis(200));
        assert!(bus_lock.acquire().is_ok());
    }

    #[test]
    fn test_busy_bus_lock_blocks_transaction() {
        let dir = tempfile::tempdir().unwrap();
        let holder = NamedLock::new(dir.path().join("modbus_client.lock"), Duration::from_secs(1));
        let _guard = holder.acquire().unwrap();

        let device = DeviceAddress {
            ip: "127.0.0.1".into(),
            port: closed_local_port(),
        };
        assert!(matches!(
            client_in(&dir).write_single_register(&device, 10, 1),
            Err(ProtocolError::Lock(LockError::Timeout { .. }))
        ));
    }
}
