//! Append-only CSV log of sensor readings

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::models::Reading;
use crate::helpers::format_timestamp;

pub const CSV_HEADER: [&str; 6] = ["timestamp", "label", "ip", "port", "length", "value"];

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("cannot open reading log {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Destination for readings produced by a polling cycle
pub trait ReadingSink {
    fn append(&mut self, reading: &Reading) -> Result<(), OutputError>;
}

#[derive(Serialize)]
struct CsvRow<'a> {
    timestamp: String,
    label: &'a str,
    ip: &'a str,
    port: u16,
    length: u16,
    value: String,
}

impl<'a> From<&'a Reading> for CsvRow<'a> {
    fn from(reading: &'a Reading) -> Self {
        CsvRow {
            timestamp: format_timestamp(&reading.timestamp),
            label: &reading.label,
            ip: &reading.address.ip,
            port: reading.address.port,
            length: reading.register_count,
            value: reading.values_text(),
        }
    }
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Open `path` for appending; the header goes in only when the file is empty
    pub fn open(path: &Path) -> Result<Self, OutputError> {
        let open_err = |source| OutputError::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_err)?;
        let is_new = file.metadata().map_err(open_err)?.len() == 0;
        log::debug!("Logging readings to {}", path.display());
        Self::from_writer(file, is_new)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W, write_header: bool) -> Result<Self, OutputError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        if write_header {
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
        }
        Ok(Self { writer })
    }
}

impl<W: Write> ReadingSink for CsvSink<W> {
    fn append(&mut self, reading: &Reading) -> Result<(), OutputError> {
        self.writer.serialize(CsvRow::from(reading))?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Use `primary` when its directory exists (e.g. the data disk is mounted),
/// otherwise `fallback`
pub fn select_log_path(primary: &Path, fallback: &Path) -> PathBuf {
    let primary_dir_exists = match primary.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.is_dir(),
        _ => true,
    };
    if primary_dir_exists {
        primary.to_path_buf()
    } else {
        log::info!(
            "Directory for {} missing; logging readings to {}",
            primary.display(),
            fallback.display()
        );
        fallback.to_path_buf()
    }
}
