//! Lock-protected loading of the sensor inventory and the actuator schedule
//!
//! The lock is held only while the file is read and parsed into memory; the
//! per-entry validation that follows and every network call made with the
//! result happen after it has been released.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use serde_json::Value;
use thiserror::Error;

use crate::interfaces::file_lock::{LockError, NamedLock};

use super::models::{DeviceKind, RawRecord, ScheduleEvent, SensorDevice};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("could not parse configuration JSON in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("configuration file {} does not contain a JSON array", .0.display())]
    NotAnArray(PathBuf),
    #[error("could not read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Lock(#[from] LockError),
}

/// A single rejected entry; the rest of the file is still used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("entry #{index}{}: {reason}", label_suffix(.label))]
pub struct ConfigEntryError {
    pub index: usize,
    pub label: Option<String>,
    pub reason: String,
}

fn label_suffix(label: &Option<String>) -> String {
    label
        .as_ref()
        .map(|l| format!(" ('{}')", l))
        .unwrap_or_default()
}

#[derive(Debug)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub rejected: Vec<ConfigEntryError>,
}

/// One JSON configuration file and the lock guarding reads of it
#[derive(Clone, Debug)]
pub struct ConfigStore {
    path: PathBuf,
    lock: NamedLock,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>, lock: NamedLock) -> Self {
        Self {
            path: path.into(),
            lock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sensors listed in the inventory; non-sensor entries are ignored
    pub fn load_sensors(&self) -> Result<Loaded<SensorDevice>, ConfigError> {
        let entries = self.read_entries()?;
        let loaded = validate(entries, |raw| match raw.kind()? {
            Some(DeviceKind::Sensor) => raw.into_sensor().map(Some),
            _ => Ok(None),
        });
        log_rejected(&self.path, &loaded);
        Ok(loaded)
    }

    /// Flattened schedule events; entries without a type are taken as actuator events
    pub fn load_schedule(&self) -> Result<Loaded<ScheduleEvent>, ConfigError> {
        let entries = self.read_entries()?;
        let loaded = validate(entries, |raw| match raw.kind()? {
            Some(DeviceKind::Actuator) | None => raw.into_schedule_event().map(Some),
            Some(DeviceKind::Sensor) => Err("sensor entry in schedule".into()),
        });
        log_rejected(&self.path, &loaded);
        Ok(loaded)
    }

    fn read_entries(&self) -> Result<Vec<Value>, ConfigError> {
        let document = {
            let _guard = self.lock.acquire()?;
            log::debug!(
                "Process {}: config lock acquired for reading {}",
                process::id(),
                self.path.display()
            );
            self.read_document()?
        };
        log::debug!("Process {}: config lock released", process::id());

        match document {
            Value::Array(entries) => {
                log::info!(
                    "Read {} entries from {}",
                    entries.len(),
                    self.path.display()
                );
                Ok(entries)
            }
            _ => Err(ConfigError::NotAnArray(self.path.clone())),
        }
    }

    fn read_document(&self) -> Result<Value, ConfigError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound(self.path.clone())
            } else {
                ConfigError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

fn validate<T, F>(entries: Vec<Value>, mut convert: F) -> Loaded<T>
where
    F: FnMut(RawRecord) -> Result<Option<T>, String>,
{
    let mut loaded = Loaded {
        items: Vec::with_capacity(entries.len()),
        rejected: Vec::new(),
    };

    for (index, entry) in entries.into_iter().enumerate() {
        let label = entry
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_string);
        let result = serde_json::from_value::<RawRecord>(entry)
            .map_err(|e| e.to_string())
            .and_then(&mut convert);
        match result {
            Ok(Some(item)) => loaded.items.push(item),
            Ok(None) => log::trace!("Skipping entry #{} of unrelated type", index),
            Err(reason) => loaded.rejected.push(ConfigEntryError {
                index,
                label,
                reason,
            }),
        }
    }

    loaded
}

fn log_rejected<T>(path: &Path, loaded: &Loaded<T>) {
    for rejected in &loaded.rejected {
        log::warn!("Skipping {} in {}", rejected, path.display());
    }
}
