use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Error};

pub struct SleepTimeArgs {
    pub schedule_file: Option<PathBuf>,
}

pub struct PollArgs {
    pub sensors_file: Option<PathBuf>,
    pub csv_file: Option<PathBuf>,
}

pub struct ActuateArgs {
    pub schedule_file: Option<PathBuf>,
}

pub struct DaemonArgs {
    pub sensors_file: Option<PathBuf>,
    pub schedule_file: Option<PathBuf>,
    pub csv_file: Option<PathBuf>,
    pub poll_interval: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigKind {
    Sensors,
    Schedule,
}

impl FromStr for ConfigKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sensors" => Ok(ConfigKind::Sensors),
            "schedule" => Ok(ConfigKind::Schedule),
            other => Err(anyhow!(
                "Unknown config kind '{}'; expected 'sensors' or 'schedule'",
                other
            )),
        }
    }
}

pub struct CheckConfigArgs {
    pub file: PathBuf,
    pub kind: ConfigKind,
}
